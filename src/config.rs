// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup and never
//! changes afterwards. Missing secrets stop the process before it serves a
//! single request.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RESPONSE_AUTH_JWT_SECRET` | HMAC key used to sign and verify tokens | Required |
//! | `RESPONSE_DATA_SECRET` | Admin secret sent to the identity store | Required |
//! | `RESPONSE_DATA_URL` | Base URL of the identity store | `http://response-data:8080` |
//! | `RESPONSE_DATA_TIMEOUT_SECS` | Bound on a single identity store call | `10` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `TLS_CERT_PATH` | PEM certificate chain (enables HTTPS) | Optional |
//! | `TLS_KEY_PATH` | PEM private key (enables HTTPS) | Optional |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

/// Environment variable name for the token signing secret.
pub const JWT_SECRET_ENV: &str = "RESPONSE_AUTH_JWT_SECRET";

/// Environment variable name for the identity store admin secret.
///
/// Distinct from the signing secret; never placed in tokens or responses.
pub const DATA_SECRET_ENV: &str = "RESPONSE_DATA_SECRET";

pub const DATA_URL_ENV: &str = "RESPONSE_DATA_URL";
pub const DATA_TIMEOUT_ENV: &str = "RESPONSE_DATA_TIMEOUT_SECS";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const TLS_CERT_PATH_ENV: &str = "TLS_CERT_PATH";
pub const TLS_KEY_PATH_ENV: &str = "TLS_KEY_PATH";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_DATA_URL: &str = "http://response-data:8080";
pub const DEFAULT_DATA_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Path of the GraphQL endpoint below the identity store base URL.
const GRAPHQL_PATH: &str = "/v1/graphql";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Logging output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT`; anything but `json` means pretty.
    pub fn from_env() -> Self {
        Self::parse(std::env::var(LOG_FORMAT_ENV).ok().as_deref())
    }

    fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Certificate and key for HTTPS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Process configuration.
#[derive(Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub data_endpoint: Url,
    pub data_secret: String,
    pub data_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub tls: Option<TlsPaths>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("data_endpoint", &self.data_endpoint.as_str())
            .field("data_secret", &"<redacted>")
            .field("data_timeout", &self.data_timeout)
            .field("bind_addr", &self.bind_addr)
            .field("tls", &self.tls)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let jwt_secret = get(JWT_SECRET_ENV).ok_or(ConfigError::Missing(JWT_SECRET_ENV))?;
        let data_secret = get(DATA_SECRET_ENV).ok_or(ConfigError::Missing(DATA_SECRET_ENV))?;

        let data_url = get(DATA_URL_ENV).unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
        let data_endpoint = graphql_endpoint(&data_url)?;

        let data_timeout = match get(DATA_TIMEOUT_ENV) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        var: DATA_TIMEOUT_ENV,
                        reason: format!("expected a positive number of seconds, got {raw:?}"),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_DATA_TIMEOUT_SECS),
        };

        let host: IpAddr = get(HOST_ENV)
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
            .parse()
            .map_err(|e| ConfigError::Invalid {
                var: HOST_ENV,
                reason: format!("{e}"),
            })?;
        let port: u16 = match get(PORT_ENV) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                var: PORT_ENV,
                reason: format!("{e}"),
            })?,
            None => DEFAULT_PORT,
        };

        let tls = match (get(TLS_CERT_PATH_ENV), get(TLS_KEY_PATH_ENV)) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert_path: PathBuf::from(cert),
                key_path: PathBuf::from(key),
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing(TLS_KEY_PATH_ENV)),
            (None, Some(_)) => return Err(ConfigError::Missing(TLS_CERT_PATH_ENV)),
        };

        Ok(Self {
            jwt_secret,
            data_endpoint,
            data_secret,
            data_timeout,
            bind_addr: SocketAddr::new(host, port),
            tls,
        })
    }
}

fn graphql_endpoint(base: &str) -> Result<Url, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        var: DATA_URL_ENV,
        reason,
    };

    let endpoint = Url::parse(&format!("{}{GRAPHQL_PATH}", base.trim_end_matches('/')))
        .map_err(|e| invalid(e.to_string()))?;

    match endpoint.scheme() {
        "http" | "https" => Ok(endpoint),
        other => Err(invalid(format!("unsupported scheme {other:?}"))),
    }
}
