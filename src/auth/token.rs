// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token signing and verification.

use std::collections::HashSet;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::{Claims, ISSUER};
use super::AuthFailure;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs and verifies tokens with a single symmetric key.
///
/// The key is handed in once at construction and never changes.
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Create a signer from the raw secret.
    ///
    /// An empty secret is a [`AuthFailure::ConfigurationError`].
    pub fn new(secret: &[u8]) -> Result<Self, AuthFailure> {
        if secret.is_empty() {
            return Err(AuthFailure::ConfigurationError(
                "token signing secret is empty".to_string(),
            ));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.validate_aud = false;
        validation.set_issuer(&[ISSUER]);
        // Server tokens carry no `exp`; it is still checked whenever present.
        validation.required_spec_claims =
            HashSet::from(["sub".to_string(), "iss".to_string()]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    /// Sign `claims` into a compact JWT.
    pub fn sign(&self, claims: &Claims) -> Result<String, AuthFailure> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| AuthFailure::ConfigurationError(format!("failed to sign token: {e}")))
    }

    /// Verify `token` and recover its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthFailure> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthFailure::TokenExpired,
                _ => AuthFailure::InvalidToken,
            })
    }
}
