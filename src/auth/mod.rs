// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Credential login and bearer token authorization for users and servers.
//!
//! ## Login Flow
//!
//! 1. Caller posts credentials (`email`/`password` or server `id`/`secret`)
//! 2. [`CredentialVerifier`] asks the identity store for matching records
//!    and requires exactly one
//! 3. [`claims::build`] maps the principal to claims:
//!    - users: `user` plus every role key, expiring after 24 hours
//!    - servers: `server` only, never expiring
//! 4. [`TokenSigner`] signs the claims (HS256) into the returned token
//!
//! ## Protected Requests
//!
//! [`require_bearer`] verifies `Authorization: Bearer <token>` before the
//! handler runs and hands the claims on through request extensions.

pub mod claims;
pub mod error;
pub mod extractor;
pub mod middleware;
pub mod principal;
pub mod token;
pub mod verifier;

pub use claims::{Claims, NamespacedClaims, PrincipalClaim};
pub use error::AuthFailure;
pub use extractor::{Auth, UserOnly};
pub use middleware::require_bearer;
pub use principal::{Credentials, Principal, PrincipalKind};
pub use token::TokenSigner;
pub use verifier::CredentialVerifier;
