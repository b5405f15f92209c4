// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Records exchanged with the identity store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A role held by a user.
///
/// Only `key` takes part in token claims; `title` and `description` are
/// profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Role {
    pub id: String,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Join row between a user and one of its roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RoleMembership {
    pub role: Role,
}

/// A user matched by a credential lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<RoleMembership>,
}

impl UserRecord {
    /// Display name built from the first and last name, skipping blanks.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A server matched by a credential lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Profile returned to an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    /// User's unique ID
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub email: String,
    /// Roles assigned to the user
    #[serde(default)]
    pub roles: Vec<RoleMembership>,
}

/// Fields written by the registration mutation.
#[derive(Clone, Deserialize, ToSchema)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: Option<&str>, last: Option<&str>) -> UserRecord {
        UserRecord {
            id: "u1".to_string(),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            roles: Vec::new(),
        }
    }

    #[test]
    fn display_name_joins_first_and_last() {
        assert_eq!(record(Some("Ada"), Some("Lovelace")).display_name(), "Ada Lovelace");
    }

    #[test]
    fn display_name_skips_missing_parts() {
        assert_eq!(record(Some("Ada"), None).display_name(), "Ada");
        assert_eq!(record(None, Some(" ")).display_name(), "");
    }

    #[test]
    fn user_record_parses_nested_roles() {
        let raw = r#"{
            "id": "u1",
            "first_name": "Ada",
            "roles": [{"role": {"id": "r1", "key": "admin"}}]
        }"#;
        let user: UserRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(user.roles.len(), 1);
        assert_eq!(user.roles[0].role.key, "admin");
        assert!(user.roles[0].role.title.is_none());
    }

    #[test]
    fn profile_accepts_null_names() {
        let raw = r#"{
            "id": "u1",
            "first_name": null,
            "email": "ada@example.com",
            "roles": []
        }"#;
        let profile: UserProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.first_name, None);
        assert_eq!(profile.last_name, None);
        assert_eq!(profile.email, "ada@example.com");
    }

    #[test]
    fn new_user_debug_hides_password() {
        let user = NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{user:?}");
        assert!(printed.contains("ada@example.com"));
        assert!(!printed.contains("hunter2"));
    }
}
