//! Simulation handlers
//!
//! Requests pass the request schema first (`validator`), then the product
//! rules inside the domain. Each failure has its own error body.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use domain_simulation::{
    quote, FinancingSimulation, PageRequest, SimulationError, SimulationParameters, SimulationSummary,
};
use validator::Validate;

use crate::auth::Claims;
use crate::dto::simulation::*;
use crate::{error::ApiError, AppState};

/// Validates, computes and stores a simulation
pub async fn create_simulation(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SimulationCreatedResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let params = SimulationParameters::from(&request);
    let simulation = FinancingSimulation::create(claims.student_id()?, &params)?;
    state.simulations.save(&simulation).await?;

    Ok((
        StatusCode::CREATED,
        Json(SimulationCreatedResponse {
            message: "Simulation created successfully".to_string(),
            simulation: simulation.view()?.into(),
        }),
    ))
}

/// Computes a simulation without storing it
pub async fn preview_simulation(
    Extension(_claims): Extension<Claims>,
    payload: Result<Json<SimulationRequest>, JsonRejection>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let params = SimulationParameters::from(&request);
    let result = quote(&params)?;
    let response = QuoteResponse::new(&params, result).map_err(SimulationError::from)?;

    Ok(Json(response))
}

/// Lists the student's simulations, newest first
pub async fn list_simulations(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<ListQuery>,
) -> Result<Json<SimulationListResponse>, ApiError> {
    let page_request = PageRequest::new(query.page(), query.limit());
    let page = state
        .simulations
        .list_for_student(claims.student_id()?, page_request)
        .await?;

    let pagination = Pagination::from(&page);
    let page = page.try_map(|s| s.view().map(SimulationResponse::from))?;

    Ok(Json(SimulationListResponse {
        pagination,
        simulations: page.items,
    }))
}

/// Dashboard totals
pub async fn simulations_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let simulations = state
        .simulations
        .all_for_student(claims.student_id()?)
        .await?;
    let summary = SimulationSummary::from_simulations(&simulations)?;
    Ok(Json(summary.into()))
}

/// Amount financed over time, oldest first
pub async fn simulations_evolution(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<EvolutionResponse>, ApiError> {
    let points = state
        .simulations
        .evolution_for_student(claims.student_id()?)
        .await?;

    Ok(Json(EvolutionResponse {
        simulations: points.into_iter().map(Into::into).collect(),
    }))
}
