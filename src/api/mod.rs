// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{authentication_gate, Role},
    models::{
        CreateCustomerRequest, Customer, Invoice, LoginRequest, LoginResponse, NewInvoice,
        RegisterRequest, UserResponse,
    },
    state::AppState,
};

pub mod customers;
pub mod health;
pub mod invoices;
pub mod users;

pub fn router(state: AppState) -> Router {
    let gate = state.authentication_gate();

    let routes = Router::new()
        .route("/health", get(health::health))
        .route("/user/register", post(users::register))
        .route("/user/login", post(users::login))
        .route("/user/profile", get(users::profile))
        .route(
            "/customer",
            get(customers::list_customers).post(customers::create_customer),
        )
        .route("/customer/{customer_id}", get(customers::get_customer))
        .route(
            "/invoice",
            get(invoices::list_invoices).post(invoices::create_invoice),
        )
        .route("/invoice/{invoice_id}", get(invoices::get_invoice))
        .route(
            "/invoice/addtocustomer/{customer_id}",
            post(invoices::add_invoice_to_customer),
        )
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(middleware::from_fn_with_state(gate, authentication_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::register,
        users::login,
        users::profile,
        customers::create_customer,
        customers::list_customers,
        customers::get_customer,
        invoices::create_invoice,
        invoices::list_invoices,
        invoices::get_invoice,
        invoices::add_invoice_to_customer
    ),
    components(
        schemas(
            Role,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            Customer,
            CreateCustomerRequest,
            customers::CustomerDetails,
            Invoice,
            NewInvoice,
            health::HealthResponse
        )
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Registration, login and profile"),
        (name = "Customers", description = "Customer management"),
        (name = "Invoices", description = "Invoice issuing and lookup")
    )
)]
struct ApiDoc;
