// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{auth::OptionalAuth, state::AppState};

/// Health check response with store counters.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving requests.
    pub status: String,
    pub checks: HealthChecks,
    /// Subject of the bearer token, when one was sent and accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authenticated_as: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    pub service: String,
    /// "ok" when the store lock could be taken.
    pub store: String,
}

/// Liveness and store availability. Public; no token needed.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health(
    OptionalAuth(identity): OptionalAuth,
    State(state): State<AppState>,
) -> Json<HealthResponse> {
    let store = match state.store.try_read() {
        Ok(_) => "ok",
        Err(_) => "busy",
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            store: store.to_string(),
        },
        authenticated_as: identity.map(|identity| identity.subject().to_string()),
    })
}
