// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! GraphQL client for the Response Data identity store.
//!
//! Every request is a `POST` of `{query, variables}` to the store's GraphQL
//! endpoint and carries the administrative secret in the
//! `X-Hasura-Admin-Secret` header. The secret stays inside this client; it
//! is never logged and never copied into tokens or responses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::{IdentityStore, NewUser, ServerRecord, StoreError, UserProfile, UserRecord};

/// Header carrying the store's administrative secret.
pub const ADMIN_SECRET_HEADER: &str = "X-Hasura-Admin-Secret";

const USERS_BY_CREDENTIALS: &str = r#"
query ($email: String!, $password: String!) {
  users: users_by_credentials(
    args: { user_email: $email, user_password: $password }
  ) {
    id
    first_name
    last_name
    roles {
      role {
        id
        key
      }
    }
  }
}
"#;

const SERVERS_BY_CREDENTIALS: &str = r#"
query ($id: uuid!, $secret: String!) {
  servers: servers_by_credentials(
    args: { server_id: $id, server_secret: $secret }
  ) {
    id
    name
  }
}
"#;

const USER_PROFILE: &str = r#"
query ($user_id: uuid!) {
  users(where: { id: { _eq: $user_id } }) {
    id
    first_name
    last_name
    email
    roles {
      role {
        id
        key
        title
        description
      }
    }
  }
}
"#;

const INSERT_USER: &str = r#"
mutation (
  $first_name: String!,
  $last_name: String!,
  $email: String!,
  $password: String!
) {
  users: insert_users(
    objects: {
      first_name: $first_name,
      last_name: $last_name,
      email: $email,
      password: $password
    }
  ) {
    affected_rows
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UsersData<T> {
    users: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ServersData {
    servers: Vec<ServerRecord>,
}

#[derive(Debug, Deserialize)]
struct InsertUsersData {
    users: AffectedRows,
}

#[derive(Debug, Deserialize)]
struct AffectedRows {
    affected_rows: u64,
}

/// Identity store reached over GraphQL.
#[derive(Clone)]
pub struct GraphQlIdentityStore {
    endpoint: Url,
    admin_secret: String,
    http: Client,
}

impl std::fmt::Debug for GraphQlIdentityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlIdentityStore")
            .field("endpoint", &self.endpoint.as_str())
            .field("admin_secret", &"<redacted>")
            .finish()
    }
}

impl GraphQlIdentityStore {
    /// Create a client for the GraphQL `endpoint`.
    ///
    /// `timeout` bounds every request end to end.
    pub fn new(
        endpoint: Url,
        admin_secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            endpoint,
            admin_secret: admin_secret.into(),
            http,
        })
    }

    /// The GraphQL endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .header(ADMIN_SECRET_HEADER, &self.admin_secret)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }

        let body: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        if !body.errors.is_empty() {
            let messages: Vec<String> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(StoreError::Query(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| StoreError::InvalidResponse("missing data".to_string()))
    }
}

fn request_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout
    } else {
        StoreError::Request(e.to_string())
    }
}

#[async_trait]
impl IdentityStore for GraphQlIdentityStore {
    async fn users_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Vec<UserRecord>, StoreError> {
        let data: UsersData<UserRecord> = self
            .execute(
                USERS_BY_CREDENTIALS,
                json!({ "email": email, "password": password }),
            )
            .await?;
        Ok(data.users)
    }

    async fn servers_by_credentials(
        &self,
        id: &str,
        secret: &str,
    ) -> Result<Vec<ServerRecord>, StoreError> {
        let data: ServersData = self
            .execute(SERVERS_BY_CREDENTIALS, json!({ "id": id, "secret": secret }))
            .await?;
        Ok(data.servers)
    }

    async fn user_profile(&self, user_id: &str) -> Result<Option<UserProfile>, StoreError> {
        let data: UsersData<UserProfile> = self
            .execute(USER_PROFILE, json!({ "user_id": user_id }))
            .await?;
        Ok(data.users.into_iter().next())
    }

    async fn register_user(&self, user: &NewUser) -> Result<u64, StoreError> {
        let data: InsertUsersData = self
            .execute(
                INSERT_USER,
                json!({
                    "first_name": user.first_name,
                    "last_name": user.last_name,
                    "email": user.email,
                    "password": user.password,
                }),
            )
            .await?;
        Ok(data.users.affected_rows)
    }
}
