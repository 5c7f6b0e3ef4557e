// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public/private route classification.
//!
//! Decides whether the authentication gate runs for a request at all.

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap, Method};

/// Scheme prefix of an `Authorization` header carrying a bearer token.
/// Matched case-sensitively.
pub const TOKEN_PREFIX: &str = "Bearer ";

/// Endpoints reachable without a token (exact path match).
pub const PUBLIC_ROUTES: [&str; 3] = ["/user/register", "/user/login", "/user/verify/code"];

/// The parts of a request the exemption decision looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub method: String,
    pub path: String,
    pub has_bearer_header: bool,
}

impl RouteDescriptor {
    pub fn from_parts(parts: &Parts) -> Self {
        Self {
            method: parts.method.as_str().to_string(),
            path: parts.uri.path().to_string(),
            has_bearer_header: has_bearer_header(&parts.headers),
        }
    }

    /// True when the request may skip authentication.
    ///
    /// Note that an `Authorization` header with any scheme other than
    /// `Bearer ` also skips the gate; the request then reaches handlers with
    /// an anonymous context.
    pub fn is_exempt(&self) -> bool {
        !self.has_bearer_header
            || self.method.eq_ignore_ascii_case(Method::OPTIONS.as_str())
            || PUBLIC_ROUTES.contains(&self.path.as_str())
    }
}

/// Classify a request directly from its parts.
pub fn is_exempt(parts: &Parts) -> bool {
    RouteDescriptor::from_parts(parts).is_exempt()
}

fn has_bearer_header(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(TOKEN_PREFIX))
}
