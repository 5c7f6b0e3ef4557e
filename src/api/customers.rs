// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Customer endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateCustomerRequest, Customer, Invoice, Page, PageQuery},
    state::AppState,
};

/// A customer together with the invoices billed to it.
#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDetails {
    pub customer: Customer,
    pub invoices: Vec<Invoice>,
}

#[utoipa::path(
    post,
    path = "/customer",
    request_body = CreateCustomerRequest,
    tag = "Customers",
    security(("bearer" = [])),
    responses(
        (status = 201, body = Customer),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Missing CREATE:CUSTOMER"),
    )
)]
pub async fn create_customer(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    identity.require_authority("CREATE:CUSTOMER")?;
    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("Customer name cannot be empty"));
    }

    let customer = state.store.write().await.create_customer(request);
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/customer",
    params(PageQuery),
    tag = "Customers",
    security(("bearer" = [])),
    responses((status = 200, body = Page<Customer>))
)]
pub async fn list_customers(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Customer>>, ApiError> {
    identity.require_authority("READ:CUSTOMER")?;
    Ok(Json(state.store.read().await.get_customers(query)))
}

#[utoipa::path(
    get,
    path = "/customer/{customer_id}",
    params(
        ("customer_id" = u64, Path, description = "Identifier of the customer")
    ),
    tag = "Customers",
    security(("bearer" = [])),
    responses(
        (status = 200, body = CustomerDetails),
        (status = 404, description = "Customer not found"),
    )
)]
pub async fn get_customer(
    Auth(identity): Auth,
    Path(customer_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<CustomerDetails>, ApiError> {
    identity.require_authority("READ:CUSTOMER")?;

    let store = state.store.read().await;
    let customer = store.get_customer(customer_id)?;
    let invoices = store.invoices_for_customer(customer_id);
    Ok(Json(CustomerDetails { customer, invoices }))
}
