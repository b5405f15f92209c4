// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for verified claims.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(claims): Auth) -> impl IntoResponse {
//!     // claims.principal_id() is the caller
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::authenticate;
use super::{AuthFailure, Claims, PrincipalKind};
use crate::state::AppState;

/// Claims of the authenticated caller.
///
/// Uses the claims left by [`require_bearer`](super::require_bearer) when the
/// route is gated, and verifies the bearer token itself otherwise.
pub struct Auth(pub Claims);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthFailure;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>().cloned() {
            return Ok(Auth(claims));
        }

        let claims = authenticate(&parts.headers, &state.tokens)?;
        Ok(Auth(claims))
    }
}

/// Claims of an authenticated user. Server tokens are rejected.
pub struct UserOnly(pub Claims);

impl FromRequestParts<AppState> for UserOnly {
    type Rejection = AuthFailure;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Auth(claims) = Auth::from_request_parts(parts, state).await?;

        if claims.kind() != PrincipalKind::User {
            return Err(AuthFailure::Unauthorized);
        }

        Ok(UserOnly(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::build;
    use crate::auth::{Principal, TokenSigner};
    use crate::identity::mock::MockIdentityStore;
    use axum::http::Request;
    use std::sync::Arc;

    fn create_test_state() -> AppState {
        AppState::new(
            Arc::new(MockIdentityStore::new()),
            TokenSigner::new(b"extractor-secret").unwrap(),
        )
    }

    fn server_claims() -> Claims {
        build(&Principal::Server {
            id: "s1".to_string(),
            name: "ingest".to_string(),
        })
    }

    fn user_claims() -> Claims {
        build(&Principal::User {
            id: "u1".to_string(),
            name: "Ada".to_string(),
            roles: Vec::new(),
        })
    }

    fn empty_parts() -> Parts {
        Request::builder().uri("/test").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn auth_extractor_requires_auth_header() {
        let state = create_test_state();
        let mut parts = empty_parts();

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthFailure::Unauthorized)));
    }

    #[tokio::test]
    async fn auth_extractor_verifies_bearer_token() {
        let state = create_test_state();
        let token = state.tokens.sign(&user_claims()).unwrap();
        let mut parts = Request::builder()
            .uri("/test")
            .header("Authorization", format!("Bearer {token}"))
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let Auth(claims) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(claims.principal_id(), "u1");
    }

    #[tokio::test]
    async fn auth_extractor_prefers_extensions() {
        let state = create_test_state();
        let mut parts = empty_parts();
        parts.extensions.insert(user_claims());

        let Auth(claims) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(claims.principal_id(), "u1");
    }

    #[tokio::test]
    async fn user_only_rejects_server_tokens() {
        let state = create_test_state();
        let mut parts = empty_parts();
        parts.extensions.insert(server_claims());

        let result = UserOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthFailure::Unauthorized)));
    }

    #[tokio::test]
    async fn user_only_accepts_user_tokens() {
        let state = create_test_state();
        let mut parts = empty_parts();
        parts.extensions.insert(user_claims());

        assert!(UserOnly::from_request_parts(&mut parts, &state).await.is_ok());
    }
}
