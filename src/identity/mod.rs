// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Identity Store
//!
//! The identity store is the service of record for users, servers, their
//! credentials and their profiles. Credential comparison happens inside the
//! store: a lookup by credentials returns every record whose stored secret
//! matches, and this crate trusts that answer.
//!
//! Authentication policy only ever talks to the [`IdentityStore`] trait, so
//! the transport (currently GraphQL over HTTP, see [`graphql`]) can be
//! swapped without touching it.

use async_trait::async_trait;

pub mod graphql;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use graphql::GraphQlIdentityStore;
pub use models::{NewUser, Role, RoleMembership, ServerRecord, UserProfile, UserRecord};

/// Transport or protocol failure talking to the identity store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("identity store request timed out")]
    Timeout,

    #[error("identity store request failed: {0}")]
    Request(String),

    #[error("identity store returned HTTP {0}")]
    Status(u16),

    #[error("identity store query failed: {0}")]
    Query(String),

    #[error("identity store response was invalid: {0}")]
    InvalidResponse(String),
}

/// Lookups and writes against the identity store.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Users whose email and password match. Normally zero or one.
    async fn users_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<UserRecord>, StoreError>;

    /// Servers whose id and secret match. Normally zero or one.
    async fn servers_by_credentials(
        &self,
        id: &str,
        secret: &str,
    ) -> Result<Vec<ServerRecord>, StoreError>;

    /// Fresh profile for a user, `None` if no such user exists.
    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError>;

    /// Insert a user and return the number of affected rows.
    async fn register_user(&self, user: &NewUser) -> Result<u64, StoreError>;
}
