// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end checks of the authentication gate through the full router.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use secure_invoices::{
    api::router,
    auth::{JwtTokenProvider, Role, TokenProvider},
    config::{JwtSettings, SeedAdmin},
    state::AppState,
    store::InMemoryStore,
};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "integration-secret-at-least-thirty-two-bytes";

fn setup() -> (AppState, Router) {
    let tokens = JwtTokenProvider::new(&JwtSettings {
        secret: SECRET.to_string(),
        issuer: "secure-invoices".to_string(),
        access_ttl_secs: 900,
    });
    let state = AppState::new(InMemoryStore::new(), Arc::new(tokens), 4);
    (state.clone(), router(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::get(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/user/register",
            None,
            json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "email": email,
                "password": password,
            }),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            Method::POST,
            "/user/login",
            None,
            json!({ "email": email, "password": password }),
        ),
    )
    .await
}

#[tokio::test]
async fn protected_route_without_token_is_unauthorized() {
    let (_, app) = setup();
    let (status, body) = send(&app, get("/invoice", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "unauthenticated");
}

#[tokio::test]
async fn non_bearer_scheme_reaches_handler_anonymously() {
    let (_, app) = setup();
    let (status, _) = send(&app, get("/customer", Some("Basic dXNlcjpwYXNz"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn lowercase_bearer_prefix_is_not_recognised() {
    let (state, app) = setup();
    let token = state
        .tokens
        .create_access_token("grace@example.com", &Role::User.granted_authorities())
        .await
        .unwrap();

    let (status, _) = send(&app, get("/invoice", Some(&format!("bearer {token}")))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_and_profile() {
    let (_, app) = setup();

    let (status, user) = register(&app, "grace@example.com", "c0bol!").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["role"], "ROLE_USER");
    assert!(user.get("password_hash").is_none());

    let (status, session) = login(&app, "grace@example.com", "c0bol!").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["token_type"], "Bearer");
    assert_eq!(session["expires_in"], 900);
    let token = session["access_token"].as_str().unwrap().to_string();

    let bearer = format!("Bearer {token}");
    let (status, profile) = send(&app, get("/user/profile", Some(&bearer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], "grace@example.com");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let (_, app) = setup();
    register(&app, "grace@example.com", "c0bol!").await;

    let (status, body) = login(&app, "grace@example.com", "fortran").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Incorrect email or password");
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let (_, app) = setup();
    let (first, _) = register(&app, "grace@example.com", "c0bol!").await;
    let (second, _) = register(&app, "GRACE@example.com", "c0bol!").await;

    assert_eq!(first, StatusCode::CREATED);
    assert_eq!(second, StatusCode::CONFLICT);
}

#[tokio::test]
async fn user_role_cannot_create_invoice() {
    let (_, app) = setup();
    register(&app, "grace@example.com", "c0bol!").await;
    let (_, session) = login(&app, "grace@example.com", "c0bol!").await;
    let token = session["access_token"].as_str().unwrap();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/invoice",
            Some(token),
            json!({
                "services": "Compiler work",
                "date": "2026-06-01",
                "status": "PENDING",
                "total": 1200.0,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Missing required authority: CREATE:INVOICE");
}

#[tokio::test]
async fn seeded_admin_bills_customer() {
    let (state, app) = setup();
    state
        .seed_admin(&SeedAdmin {
            email: "root@example.com".into(),
            password: "sup3r-secret".into(),
        })
        .await
        .unwrap();

    let (status, session) = login(&app, "root@example.com", "sup3r-secret").await;
    assert_eq!(status, StatusCode::OK);
    let token = session["access_token"].as_str().unwrap().to_string();

    let (status, customer) = send(
        &app,
        json_request(
            Method::POST,
            "/customer",
            Some(&token),
            json!({
                "name": "Navy",
                "email": "ap@navy.test",
                "customer_type": "INSTITUTION",
                "status": "ACTIVE",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = customer["id"].as_u64().unwrap();

    let invoice = json!({
        "services": "Compiler work",
        "date": "2026-06-01",
        "status": "PENDING",
        "total": 1200.0,
    });
    let (status, created) = send(
        &app,
        json_request(
            Method::POST,
            &format!("/invoice/addtocustomer/{customer_id}"),
            Some(&token),
            invoice.clone(),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["customer_id"], customer_id);

    let (status, details) = send(
        &app,
        get(&format!("/customer/{customer_id}"), Some(&format!("Bearer {token}"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["invoices"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/invoice/addtocustomer/999",
            Some(&token),
            invoice,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer with id 999 has not been found");
}

#[tokio::test]
async fn preflight_is_never_authenticated() {
    let (_, app) = setup();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/invoice")
        .header(header::AUTHORIZATION, "Bearer garbage")
        .header(header::ORIGIN, "https://app.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_success());
}
