// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User registration.
//!
//! Insert-only: the new user is written to the identity store as given and
//! no token is issued. Password handling is the store's business.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::{error::ApiError, identity::NewUser, state::AppState};

/// Registration result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub success: bool,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/register",
    tag = "Users",
    request_body = NewUser,
    responses(
        (status = 200, description = "User registered", body = RegisterResponse),
        (status = 500, description = "Registration was not applied"),
        (status = 503, description = "Identity store unavailable"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(user): Json<NewUser>,
) -> Result<Json<RegisterResponse>, ApiError> {
    let affected = state.identity.register_user(&user).await?;

    if affected != 1 {
        warn!(affected, "registration did not insert exactly one user");
        return Err(ApiError::internal(
            "There was a problem registering your account.",
        ));
    }

    info!("user registered");
    Ok(Json(RegisterResponse { success: true }))
}
