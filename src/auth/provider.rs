// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token provider capability consumed by the authentication gate.

use std::collections::BTreeSet;

use async_trait::async_trait;
use axum::http::request::Parts;

use super::{AuthError, AuthenticatedIdentity};

/// Issues and inspects bearer tokens.
///
/// The gate only sequences these calls; signature schemes, key material and
/// clocks live behind the implementation. Methods are async because a
/// provider may need I/O (key lookups, revocation lists).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Issue an access token for `subject` carrying `authorities`.
    async fn create_access_token(
        &self,
        subject: &str,
        authorities: &[String],
    ) -> Result<String, AuthError>;

    /// Subject encoded in `token`.
    async fn get_subject(&self, token: &str, request: &Parts) -> Result<String, AuthError>;

    /// True iff `token` verifies, is unexpired, and was issued to `subject`.
    async fn is_token_valid(&self, subject: &str, token: &str) -> bool;

    /// Authorities encoded in `token`.
    async fn get_authorities(&self, token: &str) -> Result<BTreeSet<String>, AuthError>;

    /// Build the identity installed into the request's security context.
    fn build_authentication(
        &self,
        subject: &str,
        authorities: BTreeSet<String>,
        _request: &Parts,
    ) -> Result<AuthenticatedIdentity, AuthError> {
        AuthenticatedIdentity::new(subject, authorities)
    }

    /// Lifetime of issued access tokens, in seconds.
    fn access_token_ttl_secs(&self) -> u64;
}
