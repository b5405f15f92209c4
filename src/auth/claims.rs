// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and the policy that builds them from a principal.
//!
//! Claims carry the standard `sub`, `iat`, `exp` and `iss` fields plus a
//! namespaced object read by the data service's authorization layer:
//!
//! ```json
//! {
//!   "sub": "u1",
//!   "iat": 1700000000,
//!   "exp": 1700086400,
//!   "iss": "response-auth.service",
//!   "name": "Ada Lovelace",
//!   "https://hasura.io/jwt/claims": {
//!     "x-hasura-allowed-roles": ["admin", "user"],
//!     "x-hasura-default-role": "user",
//!     "x-hasura-user-id": "u1"
//!   }
//! }
//! ```
//!
//! Server tokens use `x-hasura-server-id` instead and carry no `exp`.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Principal, PrincipalKind};

/// Value of the `iss` claim on every token this service issues.
pub const ISSUER: &str = "response-auth.service";

/// Key of the namespaced claims object.
pub const CLAIMS_NAMESPACE: &str = "https://hasura.io/jwt/claims";

/// How long a user token stays valid.
pub fn user_token_lifetime() -> Duration {
    Duration::hours(24)
}

/// Claims embedded in a signed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID)
    pub sub: String,
    /// Issued at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch. Absent on server tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Issuer
    pub iss: String,
    /// Display name of the principal
    pub name: String,
    #[serde(rename = "https://hasura.io/jwt/claims")]
    pub namespaced: NamespacedClaims,
}

/// Authorization fields consumed by downstream policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacedClaims {
    #[serde(rename = "x-hasura-allowed-roles")]
    pub allowed_roles: BTreeSet<String>,
    #[serde(rename = "x-hasura-default-role")]
    pub default_role: String,
    #[serde(flatten)]
    pub principal: PrincipalClaim,
}

/// The owning principal's ID, keyed by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrincipalClaim {
    #[serde(rename = "x-hasura-user-id")]
    User(String),
    #[serde(rename = "x-hasura-server-id")]
    Server(String),
}

impl Claims {
    pub fn kind(&self) -> PrincipalKind {
        match self.namespaced.principal {
            PrincipalClaim::User(_) => PrincipalKind::User,
            PrincipalClaim::Server(_) => PrincipalKind::Server,
        }
    }

    /// ID of the principal the token was issued to.
    pub fn principal_id(&self) -> &str {
        match &self.namespaced.principal {
            PrincipalClaim::User(id) | PrincipalClaim::Server(id) => id,
        }
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Build the claims for `principal`, issued now.
pub fn build(principal: &Principal) -> Claims {
    build_at(principal, Utc::now())
}

/// Build the claims for `principal` as if issued at `issued_at`.
pub fn build_at(principal: &Principal, issued_at: DateTime<Utc>) -> Claims {
    let kind = principal.kind();
    let base_role = kind.base_role();

    let mut allowed_roles = BTreeSet::from([base_role.to_string()]);
    allowed_roles.extend(principal.roles().iter().map(|role| role.key.clone()));

    let (exp, principal_claim) = match kind {
        PrincipalKind::User => (
            Some((issued_at + user_token_lifetime()).timestamp()),
            PrincipalClaim::User(principal.id().to_string()),
        ),
        // Server credentials are long-lived: their tokens never expire.
        PrincipalKind::Server => (None, PrincipalClaim::Server(principal.id().to_string())),
    };

    Claims {
        sub: principal.id().to_string(),
        iat: issued_at.timestamp(),
        exp,
        iss: ISSUER.to_string(),
        name: principal.name().to_string(),
        namespaced: NamespacedClaims {
            allowed_roles,
            default_role: base_role.to_string(),
            principal: principal_claim,
        },
    }
}
