// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Secure Invoices - invoicing service behind a bearer-token gate
//!
//! Every request passes through a stateless authentication gate that turns
//! an `Authorization: Bearer <jwt>` header into a per-request security
//! context. Handlers then demand an identity and check its authorities.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and the router
//! - `auth` - Token provider, authentication gate and extractors
//! - `config` - Environment configuration
//! - `store` - In-memory users, customers and invoices

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod store;
