//! HTTP API Layer
//!
//! REST API of the student financing simulator, built on Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for sessions, profile and simulations
//! - **Middleware**: Cookie/Bearer authentication and audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent `{error, message, details?}` bodies
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::new(students, simulations, config);
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use domain_simulation::SimulationPort;
use domain_student::{StudentPort, StudentService};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ApiConfig;
use crate::handlers::{auth as session, health, simulation, student};
use crate::middleware::{audit_middleware, auth_middleware};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub students: StudentService,
    pub simulations: Arc<dyn SimulationPort>,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(
        students: Arc<dyn StudentPort>,
        simulations: Arc<dyn SimulationPort>,
        config: ApiConfig,
    ) -> Self {
        Self {
            students: StudentService::new(students),
            simulations,
            config,
        }
    }
}

/// Creates the main API router
///
/// Everything lives under `/api` except the index at `/`. Profile and
/// simulation routes require a valid access token.
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/register", post(session::register))
        .route("/login", post(session::login))
        .route("/refresh-token", post(session::refresh_token))
        .route("/logout", post(session::logout));

    let protected_routes = Router::new()
        .route("/me", get(student::get_profile).put(student::update_profile))
        .route("/change-password", patch(student::change_password))
        .route(
            "/simulations",
            post(simulation::create_simulation).get(simulation::list_simulations),
        )
        .route("/simulations/preview", post(simulation::preview_simulation))
        .route("/simulations/summary", get(simulation::simulations_summary))
        .route("/simulations/evolution", get(simulation::simulations_evolution))
        // Outermost runs first: auth, then audit
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .route_layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    let cors = cors_layer(&state.config);

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api", public_routes.merge(protected_routes))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors),
        )
        .with_state(state)
}

/// Credentialed CORS for the configured front-end origin
fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!(origin = %config.cors_origin, "Ignoring unparsable CORS origin");
            layer
        }
    }
}
