//! Request handlers, grouped by resource

pub mod health;
pub mod auth;
pub mod student;
pub mod simulation;

use axum::{http::StatusCode, Json};
use serde::Serialize;

use crate::error::ErrorResponse;

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub endpoints: Vec<&'static str>,
}

/// `GET /` - name, version and endpoint index
pub async fn root() -> Json<ApiInfo> {
    Json(ApiInfo {
        name: "Student Financing Simulator API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec![
            "GET /api/health",
            "GET /api/health/ready",
            "POST /api/register",
            "POST /api/login",
            "POST /api/refresh-token",
            "POST /api/logout",
            "GET /api/me",
            "PUT /api/me",
            "PATCH /api/change-password",
            "POST /api/simulations",
            "POST /api/simulations/preview",
            "GET /api/simulations",
            "GET /api/simulations/summary",
            "GET /api/simulations/evolution",
        ],
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "not_found".to_string(),
            message: "Route not found".to_string(),
            details: None,
        }),
    )
}
