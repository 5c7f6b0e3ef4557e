// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Stateless bearer-token authentication for the invoicing API.
//!
//! ## Auth Flow
//!
//! 1. Client logs in via `POST /user/login` and receives an access token
//! 2. Client sends `Authorization: Bearer <token>` on later requests
//! 3. The authentication gate (middleware) runs once per request:
//!    - skips public routes, `OPTIONS` preflights and non-bearer requests
//!    - asks the [`TokenProvider`] for the subject and checks the token
//!      against it
//!    - installs a [`SecurityContext`] into the request extensions
//! 4. Handlers demand an identity through the [`Auth`] extractor and check
//!    authorities with [`AuthenticatedIdentity::require_authority`]
//!
//! ## Failure Handling
//!
//! - The gate never rejects a request; failures yield an anonymous context
//! - Failures are logged at error level with the underlying reason
//! - 401/403 responses come only from the extractors and handlers

pub mod claims;
pub mod context;
pub mod error;
pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod provider;
pub mod roles;
pub mod routes;

pub use claims::AuthenticatedIdentity;
pub use context::SecurityContext;
pub use error::AuthError;
pub use extractor::{Auth, OptionalAuth};
pub use jwt::JwtTokenProvider;
pub use middleware::{authentication_gate, AuthOutcome, AuthenticationGate};
pub use provider::TokenProvider;
pub use roles::Role;
