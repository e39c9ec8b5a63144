//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::warn;

use crate::{error::ApiError, AppState};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (pings both stores)
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let checks = [
        state.students.health_check().await,
        state.simulations.health_check().await,
    ];

    if let Some(failed) = checks.iter().find(|c| !c.is_healthy()) {
        warn!(adapter = %failed.adapter_id, message = ?failed.message, "Readiness check failed");
        return Err(ApiError::ServiceUnavailable(format!("{} is unavailable", failed.adapter_id)));
    }

    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
