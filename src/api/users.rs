// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, Json};

use crate::{auth::UserOnly, error::ApiError, identity::UserProfile, state::AppState};

/// Get the current authenticated user's profile.
///
/// The profile is read fresh from the identity store using the user ID in
/// the verified token.
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 401, description = "Unauthorized - invalid, expired or missing token"),
        (status = 404, description = "User no longer exists"),
        (status = 503, description = "Identity store unavailable"),
    )
)]
pub async fn get_current_user(
    UserOnly(claims): UserOnly,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .identity
        .user_profile(claims.principal_id())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("The user could not be found."))
}

#[cfg(test)]
mod tests {
    use crate::api::router;
    use crate::auth::claims::{build, build_at};
    use crate::auth::{Principal, TokenSigner};
    use crate::identity::mock::MockIdentityStore;
    use crate::identity::{Role, RoleMembership, UserProfile};
    use crate::state::AppState;
    use axum::{body::Body, http::Request, http::StatusCode};
    use chrono::{Duration, Utc};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn profile() -> UserProfile {
        UserProfile {
            id: "u1".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            email: "ada@example.com".to_string(),
            roles: vec![RoleMembership {
                role: Role {
                    id: "r1".to_string(),
                    key: "admin".to_string(),
                    title: Some("Administrator".to_string()),
                    description: None,
                },
            }],
        }
    }

    fn user(id: &str) -> Principal {
        Principal::User {
            id: id.to_string(),
            name: "Ada Lovelace".to_string(),
            roles: Vec::new(),
        }
    }

    async fn get_user(
        store: Arc<MockIdentityStore>,
        token: impl Fn(&TokenSigner) -> String,
    ) -> (StatusCode, serde_json::Value) {
        let signer = TokenSigner::new(b"users-secret").unwrap();
        let token = token(&signer);
        let app = router(AppState::new(store, signer));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/user")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn returns_profile_for_token_owner() {
        let store = Arc::new(MockIdentityStore::new().with_profiles(vec![profile()]));
        let (status, body) = get_user(store.clone(), |s| s.sign(&build(&user("u1"))).unwrap()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "u1");
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["roles"][0]["role"]["key"], "admin");
        assert_eq!(store.calls(), 1);
    }

    #[tokio::test]
    async fn expired_token_never_reaches_the_store() {
        let store = Arc::new(MockIdentityStore::new().with_profiles(vec![profile()]));
        let (status, _) = get_user(store.clone(), |s| {
            s.sign(&build_at(&user("u1"), Utc::now() - Duration::hours(25)))
                .unwrap()
        })
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn server_token_cannot_read_a_user_profile() {
        let store = Arc::new(MockIdentityStore::new().with_profiles(vec![profile()]));
        let server = Principal::Server {
            id: "s1".to_string(),
            name: "ingest".to_string(),
        };
        let (status, _) = get_user(store.clone(), |s| s.sign(&build(&server)).unwrap()).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn deleted_user_is_not_found() {
        let store = Arc::new(MockIdentityStore::new());
        let (status, body) = get_user(store, |s| s.sign(&build(&user("gone"))).unwrap()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "The user could not be found.");
    }

    #[tokio::test]
    async fn store_outage_is_unavailable() {
        let store = Arc::new(MockIdentityStore::failing());
        let (status, _) = get_user(store, |s| s.sign(&build(&user("u1"))).unwrap()).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
