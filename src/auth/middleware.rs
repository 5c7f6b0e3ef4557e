// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication gate and its Axum middleware.
//!
//! ## Flow
//!
//! 1. Exempt requests (see [`routes`](super::routes)) pass straight through,
//!    keeping whatever context they already carry (anonymous by default)
//! 2. The bearer token is read from `Authorization: Bearer <token>`
//! 3. The provider decodes the subject and confirms the token is valid for it
//! 4. Authorities are read and an [`AuthenticatedIdentity`] is built
//! 5. Any failure leaves the request anonymous; the cause is logged
//!
//! The gate never answers a request itself. Rejecting anonymous callers is
//! left to the extractors in [`extractor`](super::extractor).

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use futures::FutureExt;

use super::{
    routes::{self, TOKEN_PREFIX},
    AuthError, AuthenticatedIdentity, SecurityContext, TokenProvider,
};

/// Result of one authentication pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Authenticated(AuthenticatedIdentity),
    /// Carries the failure reason when a token was presented and rejected.
    Anonymous(Option<AuthError>),
}

impl From<AuthOutcome> for SecurityContext {
    fn from(outcome: AuthOutcome) -> Self {
        match outcome {
            AuthOutcome::Authenticated(identity) => SecurityContext::Authenticated(identity),
            AuthOutcome::Anonymous(_) => SecurityContext::Anonymous,
        }
    }
}

#[derive(Clone)]
pub struct AuthenticationGate {
    provider: Arc<dyn TokenProvider>,
}

impl AuthenticationGate {
    pub fn new(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }

    /// Authenticate a request. Never fails; errors become `Anonymous`.
    ///
    /// A panic inside the provider is caught and reported as
    /// [`AuthError::Provider`] so the request still reaches the handler.
    pub async fn authenticate(&self, parts: &Parts) -> AuthOutcome {
        let result = AssertUnwindSafe(self.try_authenticate(parts))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(AuthError::Provider(panic_message(panic.as_ref()))));

        match result {
            Ok(identity) => AuthOutcome::Authenticated(identity),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    method = %parts.method,
                    path = %parts.uri.path(),
                    "Request authentication failed, continuing as anonymous"
                );
                AuthOutcome::Anonymous(Some(e))
            }
        }
    }

    /// Run the gate over `parts`, writing the resulting security context.
    ///
    /// Exempt requests are left untouched apart from defaulting a missing
    /// context to anonymous.
    pub async fn process(&self, parts: &mut Parts) {
        if routes::is_exempt(parts) {
            if parts.extensions.get::<SecurityContext>().is_none() {
                parts.extensions.insert(SecurityContext::Anonymous);
            }
            return;
        }

        let context = SecurityContext::from(self.authenticate(parts).await);
        parts.extensions.insert(context);
    }

    async fn try_authenticate(&self, parts: &Parts) -> Result<AuthenticatedIdentity, AuthError> {
        let token = extract_bearer_token(parts)?;
        let subject = self.provider.get_subject(token, parts).await?;

        if !self.provider.is_token_valid(&subject, token).await {
            return Err(AuthError::TokenInvalid(format!(
                "token rejected for subject {subject}"
            )));
        }

        let authorities = self.provider.get_authorities(token).await?;
        self.provider.build_authentication(&subject, authorities, parts)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    let detail = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown cause");
    format!("token provider panicked: {detail}")
}

/// Read the raw token from `Authorization: Bearer <token>`.
///
/// The text after the prefix is returned as is.
pub fn extract_bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::TokenMissing)?
        .to_str()
        .map_err(|_| AuthError::TokenMalformed)?;

    let token = header
        .strip_prefix(TOKEN_PREFIX)
        .ok_or(AuthError::TokenMalformed)?;

    if token.is_empty() {
        return Err(AuthError::TokenMalformed);
    }
    Ok(token)
}

/// Authentication middleware function.
///
/// # Usage
///
/// ```rust,ignore
/// let gate = AuthenticationGate::new(provider);
/// let app = Router::new()
///     .route("/invoice", get(list_invoices))
///     .layer(axum::middleware::from_fn_with_state(gate, authentication_gate));
/// ```
pub async fn authentication_gate(
    State(gate): State<AuthenticationGate>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();
    gate.process(&mut parts).await;
    next.run(Request::from_parts(parts, body)).await
}
