// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::{process, sync::Arc, time::Duration};

use axum_server::{tls_rustls::RustlsConfig, Handle};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use response_auth::{
    api::router,
    auth::TokenSigner,
    config::{AppConfig, LogFormat, DEFAULT_LOG_FILTER},
    identity::GraphQlIdentityStore,
    state::AppState,
};

/// How long in-flight requests get to finish after a shutdown signal.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::fmt().with_env_filter(filter).json().init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::from_env());

    // Without both secrets no authenticated route may be served.
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            process::exit(1);
        }
    };

    let tokens = match TokenSigner::new(config.jwt_secret.as_bytes()) {
        Ok(tokens) => tokens,
        Err(e) => {
            error!(error = %e, "token signer unavailable");
            process::exit(1);
        }
    };

    let identity = match GraphQlIdentityStore::new(
        config.data_endpoint.clone(),
        config.data_secret.clone(),
        config.data_timeout,
    ) {
        Ok(store) => store,
        Err(e) => {
            error!(error = %e, "identity store client unavailable");
            process::exit(1);
        }
    };
    info!(endpoint = %identity.endpoint(), "identity store configured");

    let state = AppState::new(Arc::new(identity), tokens).with_lookup_timeout(config.data_timeout);
    let app = router(state);

    let handle = Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown signal received, draining connections");
        shutdown.graceful_shutdown(Some(SHUTDOWN_GRACE));
    });

    let addr = config.bind_addr;
    let served = match &config.tls {
        Some(tls) => {
            // Install the ring crypto provider for rustls (must be done before any TLS operations)
            if rustls::crypto::ring::default_provider()
                .install_default()
                .is_err()
            {
                warn!("rustls crypto provider was already installed");
            }

            let tls_config = match RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path).await {
                Ok(tls_config) => tls_config,
                Err(e) => {
                    error!(error = %e, "failed to load TLS certificate or key");
                    process::exit(1);
                }
            };

            info!(%addr, "Response Auth listening on https (docs at /docs)");
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
        None => {
            info!(%addr, "Response Auth listening on http (docs at /docs)");
            axum_server::bind(addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await
        }
    };

    if let Err(e) = served {
        error!(error = %e, "server failed");
        process::exit(1);
    }
}
