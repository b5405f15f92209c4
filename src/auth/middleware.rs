// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authorization gate for protected routes.
//!
//! Layer it onto a router subtree with
//! `axum::middleware::from_fn_with_state(state, require_bearer)`. Requests
//! without a valid `Authorization: Bearer <token>` header are rejected before
//! the handler runs; accepted requests carry the verified [`Claims`] in their
//! extensions, where the [`Auth`](super::Auth) extractor picks them up.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthFailure, Claims, TokenSigner};
use crate::state::AppState;

/// Pull the bearer token out of the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthFailure> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(AuthFailure::Unauthorized)?
        .to_str()
        .map_err(|_| AuthFailure::Unauthorized)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthFailure::Unauthorized)?;

    if token.is_empty() {
        return Err(AuthFailure::Unauthorized);
    }
    Ok(token)
}

/// Verify the bearer token in `headers`.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenSigner) -> Result<Claims, AuthFailure> {
    tokens.verify(bearer_token(headers)?)
}

/// Authentication middleware function.
pub async fn require_bearer(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(request.headers(), &state.tokens) {
        Ok(claims) => {
            tracing::debug!(
                kind = %claims.kind(),
                principal_id = %claims.principal_id(),
                "request authenticated"
            );
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(failure) => failure.into_response(),
    }
}
