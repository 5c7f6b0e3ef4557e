// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints: registration, login and profile.

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    auth::{password, Auth, AuthError, Role},
    error::ApiError,
    models::{LoginRequest, LoginResponse, RegisterRequest, UserResponse},
    state::AppState,
};

/// Register a new user with the default role.
#[utoipa::path(
    post,
    path = "/user/register",
    request_body = RegisterRequest,
    tag = "Users",
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid registration data"),
        (status = 409, description = "Email already in use"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate().map_err(ApiError::bad_request)?;

    let password_hash =
        password::hash_password(request.password.clone(), state.bcrypt_cost).await?;
    let user = state
        .store
        .write()
        .await
        .insert_user(request, password_hash, Role::default())?;

    tracing::info!(user_id = user.id, "Registered user");
    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// Exchange credentials for an access token.
#[utoipa::path(
    post,
    path = "/user/login",
    request_body = LoginRequest,
    tag = "Users",
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Incorrect email or password"),
        (status = 403, description = "Account disabled or locked"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .store
        .read()
        .await
        .user_by_email(&request.email)
        .cloned()
        .ok_or(AuthError::BadCredentials)?;

    if !password::verify_password(request.password, user.password_hash.clone()).await {
        tracing::warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(AuthError::BadCredentials.into());
    }
    if !user.enabled || !user.not_locked {
        return Err(AuthError::AccountDisabled.into());
    }

    let access_token = state
        .tokens
        .create_access_token(&user.email, &user.role.granted_authorities())
        .await?;

    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.access_token_ttl_secs(),
        user: UserResponse::from(&user),
    }))
}

/// Get the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/user/profile",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User information", body = UserResponse),
        (status = 401, description = "Unauthorized - invalid or missing token"),
    )
)]
pub async fn profile(
    Auth(identity): Auth,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    identity.require_authority("READ:USER")?;

    let store = state.store.read().await;
    let user = store
        .user_by_email(identity.subject())
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(Json(UserResponse::from(user)))
}
