// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{CredentialVerifier, TokenSigner};
use crate::identity::IdentityStore;

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityStore>,
    pub verifier: CredentialVerifier,
    pub tokens: Arc<TokenSigner>,
}

impl AppState {
    pub fn new(identity: Arc<dyn IdentityStore>, tokens: TokenSigner) -> Self {
        Self {
            verifier: CredentialVerifier::new(identity.clone()),
            identity,
            tokens: Arc::new(tokens),
        }
    }

    /// Bound credential lookups by `timeout`.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.verifier = self.verifier.with_lookup_timeout(timeout);
        self
    }
}
