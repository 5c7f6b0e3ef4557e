// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-request security context.
//!
//! The context travels in the request's extensions rather than in any
//! thread- or task-local slot, so concurrent requests can never observe each
//! other's identity. The authentication gate is its only writer.

use super::AuthenticatedIdentity;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SecurityContext {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedIdentity),
}

impl SecurityContext {
    pub fn identity(&self) -> Option<&AuthenticatedIdentity> {
        match self {
            SecurityContext::Authenticated(identity) => Some(identity),
            SecurityContext::Anonymous => None,
        }
    }
}
