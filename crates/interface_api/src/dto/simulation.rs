//! Simulation DTOs

use chrono::{DateTime, Utc};
use core_kernel::{Currency, Money, MoneyError, Rate, SimulationId};
use domain_simulation::{
    EvolutionPoint, Page, SimulationParameters, SimulationResult, SimulationSummary, SimulationView,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/simulations` and `/api/simulations/preview`
///
/// These bounds are the request schema. The product rules in
/// `domain_simulation::validation` run afterwards and are looser.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[validate(range(
        min = 5000.0,
        max = 50000.0,
        message = "Total amount must be between R$ 5.000 and R$ 50.000"
    ))]
    pub total_amount: f64,

    #[validate(range(min = 6, max = 36, message = "Number of installments must be between 6 and 36"))]
    pub number_of_installments: i32,

    #[validate(range(
        min = 0.0,
        max = 0.15,
        message = "Monthly interest rate must be between 0% and 15%"
    ))]
    pub monthly_interest_rate: f64,
}

impl From<&SimulationRequest> for SimulationParameters {
    fn from(request: &SimulationRequest) -> Self {
        SimulationParameters::new(
            request.total_amount,
            request.monthly_interest_rate,
            request.number_of_installments,
        )
    }
}

/// A stored simulation with its derived figures
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub id: SimulationId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub number_of_installments: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_interest_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_installment: Decimal,
    pub created_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_to_pay: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_percentage: Decimal,
}

impl From<SimulationView> for SimulationResponse {
    fn from(view: SimulationView) -> Self {
        Self {
            id: view.id,
            total_amount: view.total_amount.amount(),
            number_of_installments: view.number_of_installments,
            monthly_interest_rate: view.monthly_interest_rate.as_decimal(),
            monthly_installment: view.monthly_installment.amount(),
            created_at: view.created_at,
            total_interest: view.total_interest.amount(),
            total_to_pay: view.total_to_pay.amount(),
            interest_percentage: view.interest_percentage,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationCreatedResponse {
    pub message: String,
    pub simulation: SimulationResponse,
}

/// Figures for a simulation that was not stored
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    pub number_of_installments: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_interest_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_installment: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interest: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_to_pay: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest_percentage: Decimal,
}

impl QuoteResponse {
    pub fn new(params: &SimulationParameters, result: SimulationResult) -> Result<Self, MoneyError> {
        Ok(Self {
            total_amount: Money::from_f64(params.total_amount, Currency::BRL)?.amount(),
            number_of_installments: params.number_of_installments,
            monthly_interest_rate: Rate::from_f64(params.monthly_interest_rate)?.as_decimal(),
            monthly_installment: result.monthly_installment.amount(),
            total_interest: result.total_interest.amount(),
            total_to_pay: result.total_to_pay.amount(),
            interest_percentage: result.interest_percentage,
        })
    }
}

/// `?page=&limit=`; unparsable values fall back to the defaults
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> Option<u32> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit.as_deref().and_then(|l| l.trim().parse().ok())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u32,
}

impl<T> From<&Page<T>> for Pagination {
    fn from(page: &Page<T>) -> Self {
        Self {
            current_page: page.request.page,
            total_pages: page.total_pages(),
            total_items: page.total_items,
            items_per_page: page.request.limit,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulationListResponse {
    pub pagination: Pagination,
    pub simulations: Vec<SimulationResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total_simulations: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_financed: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_interests: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_installment: Decimal,
}

impl From<SimulationSummary> for SummaryResponse {
    fn from(summary: SimulationSummary) -> Self {
        Self {
            total_simulations: summary.total_simulations,
            total_financed: summary.total_financed.amount(),
            total_interests: summary.total_interests.amount(),
            average_installment: summary.average_installment.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionPointResponse {
    pub created_at: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

impl From<EvolutionPoint> for EvolutionPointResponse {
    fn from(point: EvolutionPoint) -> Self {
        Self {
            created_at: point.created_at,
            total_amount: point.total_amount.amount(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EvolutionResponse {
    pub simulations: Vec<EvolutionPointResponse>,
}
