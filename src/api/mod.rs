// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_bearer,
    identity::{NewUser, Role, RoleMembership, UserProfile},
    state::AppState,
};

pub mod health;
pub mod login;
pub mod register;
pub mod users;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/user", get(users::get_current_user))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let public = Router::new()
        .route("/", get(health::index))
        .route("/login", post(login::login))
        .route("/server/login", post(login::server_login))
        .route("/register", post(register::register));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::index,
        login::login,
        login::server_login,
        register::register,
        users::get_current_user
    ),
    components(
        schemas(
            login::LoginRequest,
            login::ServerLoginRequest,
            login::TokenResponse,
            register::RegisterResponse,
            NewUser,
            UserProfile,
            RoleMembership,
            Role
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Credential login and token issuance"),
        (name = "Users", description = "User registration and profile"),
        (name = "Health", description = "Service status")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenSigner;
    use crate::identity::mock::MockIdentityStore;
    use axum::{body::Body, http::Request, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(
            Arc::new(MockIdentityStore::new()),
            TokenSigner::new(b"router-secret").unwrap(),
        ))
    }

    #[tokio::test]
    async fn index_returns_ok() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn profile_route_is_gated() {
        let response = app()
            .oneshot(Request::builder().uri("/user").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api-doc/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"].get("/login").is_some());
        assert!(doc["components"]["securitySchemes"].get("bearer").is_some());
    }
}
