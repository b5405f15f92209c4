// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login endpoints for users and servers.
//!
//! Both answer `202 {"token": ...}` on success and
//! `401 {"error": {"message": ...}}` when the credentials are rejected.
//! A body that does not parse is rejected the same way.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::{
    auth::{claims, AuthFailure, Credentials},
    error::ApiError,
    state::AppState,
};

/// User credentials.
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Server credentials.
#[derive(Deserialize, ToSchema)]
pub struct ServerLoginRequest {
    /// Server ID (UUID)
    pub id: String,
    pub secret: String,
}

/// Issued bearer token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Log in with email and password.
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 202, description = "Token issued", body = TokenResponse),
        (status = 401, description = "Credentials not valid"),
        (status = 503, description = "Identity store unavailable"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let request = credentials_body(body)?;
    issue_token(
        &state,
        Credentials::User {
            email: request.email,
            password: request.password,
        },
    )
    .await
}

/// Log in with a server ID and secret.
#[utoipa::path(
    post,
    path = "/server/login",
    tag = "Auth",
    request_body = ServerLoginRequest,
    responses(
        (status = 202, description = "Non-expiring token issued", body = TokenResponse),
        (status = 401, description = "Credentials not valid"),
        (status = 503, description = "Identity store unavailable"),
    )
)]
pub async fn server_login(
    State(state): State<AppState>,
    body: Result<Json<ServerLoginRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let request = credentials_body(body)?;
    issue_token(
        &state,
        Credentials::Server {
            id: request.id,
            secret: request.secret,
        },
    )
    .await
}

fn credentials_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AuthFailure> {
    body.map(|Json(request)| request).map_err(|rejection| {
        debug!(status = %rejection.status(), "unreadable login body");
        AuthFailure::InvalidCredentials
    })
}

async fn issue_token(
    state: &AppState,
    credentials: Credentials,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let principal = state.verifier.verify(credentials).await?;
    let claims = claims::build(&principal);
    let token = state.tokens.sign(&claims)?;

    info!(
        kind = %principal.kind(),
        principal_id = %principal.id(),
        expires = claims.exp.is_some(),
        "token issued"
    );

    Ok((StatusCode::ACCEPTED, Json(TokenResponse { token })))
}
