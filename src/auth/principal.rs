// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Principals and the credentials that prove them.

use serde::{Deserialize, Serialize};

use crate::identity::{Role, ServerRecord, UserRecord};

/// The two kinds of principal a token can be issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalKind {
    User,
    Server,
}

impl PrincipalKind {
    /// Role every principal of this kind holds.
    pub fn base_role(self) -> &'static str {
        match self {
            PrincipalKind::User => "user",
            PrincipalKind::Server => "server",
        }
    }
}

impl std::fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.base_role())
    }
}

/// A credential pair presented at login.
///
/// Lives only for the request that carries it. `Debug` never prints the
/// secret half.
#[derive(Clone)]
pub enum Credentials {
    User { email: String, password: String },
    Server { id: String, secret: String },
}

impl Credentials {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Credentials::User { .. } => PrincipalKind::User,
            Credentials::Server { .. } => PrincipalKind::Server,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::User { email, .. } => f
                .debug_struct("User")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::Server { id, .. } => f
                .debug_struct("Server")
                .field("id", id)
                .field("secret", &"<redacted>")
                .finish(),
        }
    }
}

/// A verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    User {
        id: String,
        name: String,
        roles: Vec<Role>,
    },
    Server {
        id: String,
        name: String,
    },
}

impl Principal {
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Principal::User { .. } => PrincipalKind::User,
            Principal::Server { .. } => PrincipalKind::Server,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Principal::User { id, .. } | Principal::Server { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Principal::User { name, .. } | Principal::Server { name, .. } => name,
        }
    }

    /// Roles held beyond the base role. Always empty for servers.
    pub fn roles(&self) -> &[Role] {
        match self {
            Principal::User { roles, .. } => roles,
            Principal::Server { .. } => &[],
        }
    }
}

impl From<UserRecord> for Principal {
    fn from(record: UserRecord) -> Self {
        let name = record.display_name();
        Principal::User {
            id: record.id,
            name,
            roles: record.roles.into_iter().map(|m| m.role).collect(),
        }
    }
}

impl From<ServerRecord> for Principal {
    fn from(record: ServerRecord) -> Self {
        Principal::Server {
            id: record.id,
            name: record.name,
        }
    }
}
