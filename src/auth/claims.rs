// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Access token claims and the authenticated identity derived from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::AuthError;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
    /// Granted authority names (role followed by permissions)
    #[serde(default)]
    pub authorities: Vec<String>,
}

/// Identity of the caller, built fresh for each authenticated request.
///
/// Never constructed with an empty subject, so a security context holding one
/// is always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedIdentity {
    subject: String,
    authorities: BTreeSet<String>,
}

impl AuthenticatedIdentity {
    pub fn new(
        subject: impl Into<String>,
        authorities: impl IntoIterator<Item = String>,
    ) -> Result<Self, AuthError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(AuthError::TokenMalformed);
        }
        Ok(Self {
            subject,
            authorities: authorities.into_iter().collect(),
        })
    }

    /// The authenticated subject (the user's email).
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn authorities(&self) -> &BTreeSet<String> {
        &self.authorities
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(authority)
    }

    /// Fail with `InsufficientPermissions` unless `authority` was granted.
    pub fn require_authority(&self, authority: &str) -> Result<(), AuthError> {
        if self.has_authority(authority) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions(authority.to_string()))
        }
    }
}
