//! Pre-built Test Fixtures
//!
//! Predictable inputs shared by unit, repository and HTTP tests.

use chrono::{DateTime, TimeZone, Utc};
use domain_simulation::SimulationParameters;
use domain_student::password::hash_password;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use once_cell::sync::Lazy;

/// Password accepted by every registration rule
pub const VALID_PASSWORD: &str = "segredo123";

/// Argon2 hash of `VALID_PASSWORD`, computed once per test binary
pub static VALID_PASSWORD_HASH: Lazy<String> =
    Lazy::new(|| hash_password(VALID_PASSWORD).expect("fixture password hashes"));

/// Fixture for student data
pub struct StudentFixtures;

impl StudentFixtures {
    pub fn first_name() -> &'static str {
        "Ana"
    }

    pub fn last_name() -> &'static str {
        "Souza"
    }

    pub fn email() -> &'static str {
        "ana.souza@example.com"
    }

    /// A random but valid name pair and email
    pub fn random_identity() -> (String, String, String) {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        let email: String = SafeEmail().fake();
        // Faker names can be a single letter short of the minimum
        (format!("{first}x"), format!("{last}x"), email.to_lowercase())
    }
}

/// A simulation input with its known figures
#[derive(Debug, Clone, Copy)]
pub struct LoanScenario {
    pub params: SimulationParameters,
    pub monthly_installment: f64,
    pub total_to_pay: f64,
    pub total_interest: f64,
    pub interest_percentage: f64,
}

/// Worked loan scenarios
pub struct SimulationFixtures;

impl SimulationFixtures {
    /// 10,000 at 3.49% a month over 12 months
    pub fn twelve_months() -> LoanScenario {
        LoanScenario {
            params: SimulationParameters::new(10_000.0, 0.0349, 12),
            monthly_installment: 1034.23,
            total_to_pay: 12410.76,
            total_interest: 2410.76,
            interest_percentage: 24.11,
        }
    }

    /// Interest-free, showing the rounding drift
    pub fn interest_free() -> LoanScenario {
        LoanScenario {
            params: SimulationParameters::new(5_000.0, 0.0, 6),
            monthly_installment: 833.33,
            total_to_pay: 4999.98,
            total_interest: -0.02,
            interest_percentage: 0.0,
        }
    }

    /// Largest principal, longest term and highest rate
    pub fn product_ceiling() -> LoanScenario {
        LoanScenario {
            params: SimulationParameters::new(50_000.0, 0.15, 36),
            monthly_installment: 7549.29,
            total_to_pay: 271774.44,
            total_interest: 221774.44,
            interest_percentage: 443.55,
        }
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Fixed reference instant (Mar 1, 2025)
    pub fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    /// `days` before the reference instant
    pub fn days_before(days: i64) -> DateTime<Utc> {
        Self::reference() - chrono::Duration::days(days)
    }
}
