// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory identity store for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{IdentityStore, NewUser, ServerRecord, StoreError, UserProfile, UserRecord};

/// Canned responses plus a counter of every call made.
#[derive(Default)]
pub struct MockIdentityStore {
    pub users: Vec<UserRecord>,
    pub servers: Vec<ServerRecord>,
    pub profiles: Vec<UserProfile>,
    pub affected_rows: u64,
    pub fail: bool,
    pub delay: Option<std::time::Duration>,
    calls: AtomicUsize,
    registered: Mutex<Vec<String>>,
    server_ids: Mutex<Vec<String>>,
}

impl MockIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, users: Vec<UserRecord>) -> Self {
        self.users = users;
        self
    }

    pub fn with_servers(mut self, servers: Vec<ServerRecord>) -> Self {
        self.servers = servers;
        self
    }

    pub fn with_profiles(mut self, profiles: Vec<UserProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn registered_emails(&self) -> Vec<String> {
        self.registered.lock().unwrap().clone()
    }

    /// Server ids passed to `servers_by_credentials`, in call order.
    pub fn server_ids_seen(&self) -> Vec<String> {
        self.server_ids.lock().unwrap().clone()
    }

    async fn enter(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            return Err(StoreError::Request("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for MockIdentityStore {
    async fn users_by_credentials(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<Vec<UserRecord>, StoreError> {
        self.enter().await?;
        Ok(self.users.clone())
    }

    async fn servers_by_credentials(
        &self,
        id: &str,
        _secret: &str,
    ) -> Result<Vec<ServerRecord>, StoreError> {
        self.server_ids.lock().unwrap().push(id.to_string());
        self.enter().await?;
        Ok(self.servers.clone())
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        self.enter().await?;
        Ok(self.profiles.iter().find(|p| p.id == user_id).cloned())
    }

    async fn register_user(&self, user: &NewUser) -> Result<u64, StoreError> {
        self.enter().await?;
        self.registered.lock().unwrap().push(user.email.clone());
        Ok(self.affected_rows)
    }
}
