// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response data structures used by the REST API. All types
//! derive `Serialize`/`Deserialize` and `ToSchema` for JSON handling and
//! OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Users**: Registration, login and profile data
//! - **Customers**: Billed parties
//! - **Invoices**: Invoices issued to customers
//! - **Paging**: 0-based page requests and responses

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::Role;

// =============================================================================
// User Models
// =============================================================================

/// A registered user as held by the store.
///
/// The password hash never leaves the store; API responses use
/// [`UserResponse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub enabled: bool,
    pub not_locked: bool,
    pub using_mfa: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserResponse {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub enabled: bool,
    pub not_locked: bool,
    pub using_mfa: bool,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            phone: user.phone.clone(),
            title: user.title.clone(),
            bio: user.bio.clone(),
            image_url: user.image_url.clone(),
            enabled: user.enabled,
            not_locked: user.not_locked,
            using_mfa: user.using_mfa,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl RegisterRequest {
    /// Field-level validation; returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() {
            return Err("First name cannot be empty".into());
        }
        if self.last_name.trim().is_empty() {
            return Err("Last name cannot be empty".into());
        }
        if !is_plausible_email(&self.email) {
            return Err("Invalid email. Please enter a valid email address".into());
        }
        if self.password.is_empty() {
            return Err("Password cannot be empty".into());
        }
        Ok(())
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.contains('@'),
        None => false,
    }
}

/// Login credentials.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    pub user: UserResponse,
}

// =============================================================================
// Customer Models
// =============================================================================

/// A billed party.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// e.g. `INDIVIDUAL` or `INSTITUTION`.
    pub customer_type: String,
    /// e.g. `ACTIVE`, `PENDING`, `BANNED`.
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request to create a customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    pub customer_type: String,
    pub status: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// =============================================================================
// Invoice Models
// =============================================================================

/// An invoice, optionally linked to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Invoice {
    pub id: u64,
    /// Eight uppercase alphanumeric characters.
    pub invoice_number: String,
    /// Description of the billed services.
    pub services: String,
    pub date: NaiveDate,
    /// e.g. `PENDING`, `PAID`, `OVERDUE`.
    pub status: String,
    pub total: f64,
    /// Set when the invoice is created through the invoice endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<u64>,
}

/// Invoice fields supplied by the client.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewInvoice {
    pub services: String,
    pub date: NaiveDate,
    pub status: String,
    pub total: f64,
}

// =============================================================================
// Paging
// =============================================================================

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;

/// 0-based page request.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page index, starting at 0.
    pub page: Option<usize>,
    /// Page size, 1 to 100.
    pub size: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(0)
    }

    pub fn size(&self) -> usize {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Slice `items` (already in display order) into the requested page.
    pub fn of(items: &[T], query: PageQuery) -> Self {
        let page = query.page();
        let size = query.size();
        let total_elements = items.len();
        let content = items
            .iter()
            .skip(page.saturating_mul(size))
            .take(size)
            .cloned()
            .collect();

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages: total_elements.div_ceil(size),
        }
    }
}
