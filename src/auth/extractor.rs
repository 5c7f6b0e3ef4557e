// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors over the per-request security context.
//!
//! These are the authorization side of the gate: the gate silently
//! authenticates, and handlers opt into requiring an identity by taking one
//! of these extractors.
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     identity.require_authority("READ:INVOICE")?;
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::{AuthError, AuthenticatedIdentity, SecurityContext};

/// Requires an authenticated identity; rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct Auth(pub AuthenticatedIdentity);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<SecurityContext>() {
            Some(SecurityContext::Authenticated(identity)) => Ok(Auth(identity.clone())),
            _ => Err(AuthError::Unauthenticated),
        }
    }
}

/// Optional authentication extractor.
///
/// Returns `None` for anonymous requests instead of rejecting.
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthenticatedIdentity>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<SecurityContext>()
            .and_then(SecurityContext::identity)
            .cloned();
        Ok(OptionalAuth(identity))
    }
}
