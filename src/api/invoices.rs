// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{Invoice, NewInvoice, Page, PageQuery},
    state::AppState,
};

fn validate(invoice: &NewInvoice) -> Result<(), ApiError> {
    if invoice.services.trim().is_empty() {
        return Err(ApiError::bad_request("Invoice services cannot be empty"));
    }
    if !invoice.total.is_finite() || invoice.total < 0.0 {
        return Err(ApiError::bad_request("Invoice total must be a non-negative amount"));
    }
    Ok(())
}

/// Issue a standalone invoice.
#[utoipa::path(
    post,
    path = "/invoice",
    request_body = NewInvoice,
    tag = "Invoices",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Invoice issued", body = Invoice),
        (status = 403, description = "Missing CREATE:INVOICE"),
    )
)]
pub async fn create_invoice(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Json(request): Json<NewInvoice>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    identity.require_authority("CREATE:INVOICE")?;
    validate(&request)?;

    let invoice = state.store.write().await.create_invoice(request);
    tracing::info!(invoice_id = invoice.id, number = %invoice.invoice_number, "Issued invoice");
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// List invoices, oldest first.
#[utoipa::path(
    get,
    path = "/invoice",
    params(PageQuery),
    tag = "Invoices",
    security(("bearer" = [])),
    responses((status = 200, body = Page<Invoice>))
)]
pub async fn list_invoices(
    Auth(identity): Auth,
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<Invoice>>, ApiError> {
    identity.require_authority("READ:INVOICE")?;
    Ok(Json(state.store.read().await.get_invoices(query)))
}

#[utoipa::path(
    get,
    path = "/invoice/{invoice_id}",
    params(("invoice_id" = u64, Path, description = "Identifier of the invoice")),
    tag = "Invoices",
    security(("bearer" = [])),
    responses(
        (status = 200, body = Invoice),
        (status = 404, description = "Invoice not found"),
    )
)]
pub async fn get_invoice(
    Auth(identity): Auth,
    Path(invoice_id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Invoice>, ApiError> {
    identity.require_authority("READ:INVOICE")?;
    Ok(Json(state.store.read().await.get_invoice(invoice_id)?))
}

/// Bill a new invoice to an existing customer.
#[utoipa::path(
    post,
    path = "/invoice/addtocustomer/{customer_id}",
    params(("customer_id" = u64, Path, description = "Customer to bill")),
    request_body = NewInvoice,
    tag = "Invoices",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Invoice added", body = Invoice),
        (status = 404, description = "Customer not found"),
    )
)]
pub async fn add_invoice_to_customer(
    Auth(identity): Auth,
    Path(customer_id): Path<u64>,
    State(state): State<AppState>,
    Json(request): Json<NewInvoice>,
) -> Result<(StatusCode, Json<Invoice>), ApiError> {
    identity.require_authority("CREATE:INVOICE")?;
    validate(&request)?;

    let invoice = state
        .store
        .write()
        .await
        .add_invoice_to_customer(customer_id, request)?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::{identity_with_role, test_state};
    use crate::auth::Role;
    use crate::models::CreateCustomerRequest;
    use chrono::NaiveDate;

    fn new_invoice(total: f64) -> NewInvoice {
        NewInvoice {
            services: "Website redesign".into(),
            date: NaiveDate::from_ymd_opt(2026, 5, 14).unwrap(),
            status: "PENDING".into(),
            total,
        }
    }

    #[tokio::test]
    async fn admin_issues_invoice() {
        let state = test_state();
        let (status, Json(invoice)) = create_invoice(
            Auth(identity_with_role(Role::Admin)),
            State(state.clone()),
            Json(new_invoice(250.0)),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(invoice.issued_at.is_some());

        let Json(fetched) = get_invoice(
            Auth(identity_with_role(Role::User)),
            Path(invoice.id),
            State(state),
        )
        .await
        .unwrap();
        assert_eq!(fetched, invoice);
    }

    #[tokio::test]
    async fn manager_cannot_issue_invoice() {
        let err = create_invoice(
            Auth(identity_with_role(Role::Manager)),
            State(test_state()),
            Json(new_invoice(10.0)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
        assert_eq!(err.message, "Missing required authority: CREATE:INVOICE");
    }

    #[tokio::test]
    async fn negative_total_is_rejected() {
        let err = create_invoice(
            Auth(identity_with_role(Role::Admin)),
            State(test_state()),
            Json(new_invoice(-1.0)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_to_customer_links_invoice() {
        let state = test_state();
        let customer = state.store.write().await.create_customer(CreateCustomerRequest {
            name: "Acme".into(),
            email: "billing@acme.test".into(),
            customer_type: "INSTITUTION".into(),
            status: "ACTIVE".into(),
            address: None,
            phone: None,
            image_url: None,
        });

        let (_, Json(invoice)) = add_invoice_to_customer(
            Auth(identity_with_role(Role::SysAdmin)),
            Path(customer.id),
            State(state.clone()),
            Json(new_invoice(75.0)),
        )
        .await
        .unwrap();
        assert_eq!(invoice.customer_id, Some(customer.id));

        let Json(page) = list_invoices(
            Auth(identity_with_role(Role::User)),
            State(state),
            Query(PageQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(page.content, vec![invoice]);
    }

    #[tokio::test]
    async fn add_to_missing_customer_is_not_found() {
        let err = add_invoice_to_customer(
            Auth(identity_with_role(Role::Admin)),
            Path(404),
            State(test_state()),
            Json(new_invoice(1.0)),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Customer with id 404 has not been found");
    }
}
