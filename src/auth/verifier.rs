// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential verification against the identity store.
//!
//! One lookup per login. The store compares the secret; this module only
//! decides what the number of matching records means:
//!
//! | matches | outcome |
//! |---------|---------|
//! | 0 | [`AuthFailure::InvalidCredentials`] |
//! | 1 | the record becomes the [`Principal`] |
//! | >1 | [`AuthFailure::AmbiguousMatch`] |

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use super::{AuthFailure, Credentials, Principal, PrincipalKind};
use crate::identity::{IdentityStore, StoreError};

/// Default bound on a single identity store lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns credentials into a verified principal.
#[derive(Clone)]
pub struct CredentialVerifier {
    store: Arc<dyn IdentityStore>,
    lookup_timeout: Duration,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Create with a custom lookup timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Verify `credentials` and return the single principal they identify.
    ///
    /// Dropping the returned future abandons the in-flight lookup.
    pub async fn verify(&self, credentials: Credentials) -> Result<Principal, AuthFailure> {
        let kind = credentials.kind();

        let principals: Vec<Principal> = match credentials {
            Credentials::User { email, password } => self
                .bounded(self.store.users_by_credentials(&email, &password))
                .await?
                .into_iter()
                .map(Principal::from)
                .collect(),
            Credentials::Server { id, secret } => {
                // Server ids are UUIDs in the store; anything else cannot match.
                // The store only understands the plain hyphenated form.
                let Ok(id) = Uuid::parse_str(&id) else {
                    debug!(kind = %kind, "server id is not a uuid");
                    return Err(AuthFailure::InvalidCredentials);
                };
                let id = id.hyphenated().to_string();
                self.bounded(self.store.servers_by_credentials(&id, &secret))
                    .await?
                    .into_iter()
                    .map(Principal::from)
                    .collect()
            }
        };

        exactly_one(kind, principals)
    }

    async fn bounded<T>(
        &self,
        lookup: impl std::future::Future<Output = Result<T, StoreError>>,
    ) -> Result<T, AuthFailure> {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result.map_err(AuthFailure::StoreUnavailable),
            Err(_) => Err(AuthFailure::StoreUnavailable(StoreError::Timeout)),
        }
    }
}

fn exactly_one(kind: PrincipalKind, mut principals: Vec<Principal>) -> Result<Principal, AuthFailure> {
    match principals.len() {
        0 => {
            debug!(kind = %kind, "no principal matched credentials");
            Err(AuthFailure::InvalidCredentials)
        }
        1 => Ok(principals.remove(0)),
        n => {
            warn!(kind = %kind, matches = n, "credentials matched more than one principal");
            Err(AuthFailure::AmbiguousMatch(n))
        }
    }
}
