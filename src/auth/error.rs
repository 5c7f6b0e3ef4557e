// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication and authorization errors.
//!
//! The first group of variants is produced while authenticating a request and
//! never reaches the client: the gate collapses them into an anonymous
//! security context. The second group is raised by downstream authorization
//! checks and rendered as 401/403 responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header on the request
    #[error("Authorization header is required")]
    TokenMissing,
    /// Header not `Bearer`-prefixed, or the token cannot be decoded
    #[error("Token is malformed")]
    TokenMalformed,
    /// Signature, expiry or subject check failed
    #[error("Token is invalid: {0}")]
    TokenInvalid(String),
    /// Authorities could not be read from the token
    #[error("Could not read authorities from token: {0}")]
    AuthorityLookupFailed(String),
    /// Unexpected failure inside the token provider
    #[error("Token provider failure: {0}")]
    Provider(String),

    /// Protected resource reached with an anonymous security context
    #[error("Authentication is required to access this resource")]
    Unauthenticated,
    /// Authenticated, but the named authority was not granted
    #[error("Missing required authority: {0}")]
    InsufficientPermissions(String),
    /// Login with an unknown email or wrong password
    #[error("Incorrect email or password")]
    BadCredentials,
    /// Login for a disabled or locked account
    #[error("Account is disabled or locked")]
    AccountDisabled,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::TokenMissing => "token_missing",
            AuthError::TokenMalformed => "token_malformed",
            AuthError::TokenInvalid(_) => "token_invalid",
            AuthError::AuthorityLookupFailed(_) => "authority_lookup_failed",
            AuthError::Provider(_) => "token_provider_error",
            AuthError::Unauthenticated => "unauthenticated",
            AuthError::InsufficientPermissions(_) => "insufficient_permissions",
            AuthError::BadCredentials => "bad_credentials",
            AuthError::AccountDisabled => "account_disabled",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::TokenMissing
            | AuthError::TokenMalformed
            | AuthError::TokenInvalid(_)
            | AuthError::AuthorityLookupFailed(_)
            | AuthError::Unauthenticated
            | AuthError::BadCredentials => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions(_) | AuthError::AccountDisabled => {
                StatusCode::FORBIDDEN
            }
            AuthError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
