// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;
use crate::identity::StoreError;

/// Message shown for every credential rejection, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "The credentials provided were not valid.";

/// Message shown when a token could not be issued.
pub const AUTHENTICATION_PROBLEM_MESSAGE: &str =
    "There was a problem authenticating you. Please try again.";

/// Why an authentication or authorization step failed.
///
/// The variants stay distinct for logs and tests. What the caller sees is
/// coarser: see [`AuthFailure::public_message`].
#[derive(Debug, thiserror::Error)]
pub enum AuthFailure {
    /// No record matched the credentials
    #[error("no principal matched the credentials")]
    InvalidCredentials,

    /// More than one record matched the credentials
    #[error("{0} principals matched the credentials")]
    AmbiguousMatch(usize),

    /// The identity store could not be reached or answered badly
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),

    /// Bad signature, malformed structure or foreign issuer
    #[error("token is invalid")]
    InvalidToken,

    /// The token's `exp` is in the past
    #[error("token has expired")]
    TokenExpired,

    /// No usable bearer token on a protected request
    #[error("bearer token is required")]
    Unauthorized,

    /// Signing key missing or unusable
    #[error("authentication is misconfigured: {0}")]
    ConfigurationError(String),
}

impl AuthFailure {
    /// Get the HTTP status code for this failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthFailure::InvalidCredentials
            | AuthFailure::AmbiguousMatch(_)
            | AuthFailure::InvalidToken
            | AuthFailure::TokenExpired
            | AuthFailure::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthFailure::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthFailure::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthFailure::InvalidCredentials | AuthFailure::AmbiguousMatch(_) => {
                INVALID_CREDENTIALS_MESSAGE
            }
            AuthFailure::StoreUnavailable(_) => {
                "The identity service is unavailable. Please try again later."
            }
            AuthFailure::InvalidToken => "The token provided is not valid.",
            AuthFailure::TokenExpired => "The token provided has expired.",
            AuthFailure::Unauthorized => "A bearer token is required.",
            AuthFailure::ConfigurationError(_) => AUTHENTICATION_PROBLEM_MESSAGE,
        }
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        match &failure {
            AuthFailure::StoreUnavailable(e) => {
                tracing::error!(error = %e, "identity store unavailable");
            }
            AuthFailure::ConfigurationError(reason) => {
                tracing::error!(reason = %reason, "authentication misconfigured");
            }
            other => tracing::debug!(reason = %other, "authentication rejected"),
        }
        ApiError::new(failure.status_code(), failure.public_message())
    }
}

impl IntoResponse for AuthFailure {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
