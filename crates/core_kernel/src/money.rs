//! Money types with precise decimal arithmetic
//!
//! Amounts are held as `rust_decimal::Decimal` and kept at the currency's
//! minor unit. Only the Brazilian real is supported. Every rounding step rounds half away from zero, so 0.005
//! becomes 0.01 and -0.005 becomes -0.01.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Currency codes following ISO 4217
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    BRL,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors that can occur during money operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A monetary amount with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value rounded to the currency's minor unit
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: round_half_away(amount, currency.decimal_places()),
            currency,
        }
    }

    /// Shorthand for a Brazilian real amount
    pub fn brl(amount: Decimal) -> Self {
        Self::new(amount, Currency::BRL)
    }

    /// Converts a floating point figure into money, rounding at the cent
    ///
    /// Float noise left over from arithmetic such as `833.33 * 6.0` is
    /// absorbed by the cent rounding.
    pub fn from_f64(value: f64, currency: Currency) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidAmount(value.to_string()));
        }
        let amount = Decimal::from_f64(value)
            .ok_or_else(|| MoneyError::InvalidAmount(value.to_string()))?;
        Ok(Self::new(amount, currency))
    }

    /// Creates a zero amount in the specified currency
    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: dec!(0),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the amount as a float for the calculator boundary
    pub fn to_f64(&self) -> f64 {
        self.amount.to_f64().unwrap_or(0.0)
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Divides by a scalar
    pub fn divide(&self, divisor: Decimal) -> Result<Self, MoneyError> {
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(Self::new(self.amount / divisor, self.currency))
    }

    /// Sums a sequence of amounts, starting from zero in `currency`
    pub fn sum<'a>(items: impl IntoIterator<Item = &'a Money>, currency: Currency) -> Money {
        items
            .into_iter()
            .fold(Money::zero(currency), |acc, m| Self::new(acc.amount + m.amount, currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

/// Rounds a decimal to `dp` places, half away from zero
pub fn round_half_away(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// A periodic interest rate (e.g., 0.035 for 3.5% per month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    value: Decimal,
}

impl Rate {
    /// Creates a rate from a decimal fraction
    pub fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Creates a rate from a float fraction, kept to 4 decimal places
    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        if !value.is_finite() {
            return Err(MoneyError::InvalidAmount(value.to_string()));
        }
        let decimal = Decimal::from_f64(value)
            .ok_or_else(|| MoneyError::InvalidAmount(value.to_string()))?;
        Ok(Self::new(round_half_away(decimal, 4)))
    }

    /// Returns the rate as a decimal fraction
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Returns the rate as a percentage
    pub fn as_percentage(&self) -> Decimal {
        self.value * dec!(100)
    }

    /// Returns the rate as a float for the calculator boundary
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or(0.0)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().round_dp(4).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_creation() {
        let m = Money::brl(dec!(100.50));
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::BRL);
    }

    #[test]
    fn test_new_rounds_half_away_from_zero() {
        assert_eq!(Money::brl(dec!(0.005)).amount(), dec!(0.01));
        assert_eq!(Money::brl(dec!(-0.005)).amount(), dec!(-0.01));
        assert_eq!(Money::brl(dec!(10.125)).amount(), dec!(10.13));
    }

    #[test]
    fn test_from_f64_absorbs_float_noise() {
        let m = Money::from_f64(833.33 * 6.0, Currency::BRL).unwrap();
        assert_eq!(m.amount(), dec!(4999.98));
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Money::from_f64(f64::NAN, Currency::BRL).is_err());
        assert!(Money::from_f64(f64::INFINITY, Currency::BRL).is_err());
    }

    #[test]
    fn test_sum() {
        let items = vec![Money::brl(dec!(10.10)), Money::brl(dec!(20.20))];
        let total = Money::sum(&items, Currency::BRL);
        assert_eq!(total.amount(), dec!(30.30));
    }

    #[test]
    fn test_display_uses_symbol() {
        assert_eq!(Money::brl(dec!(50000)).to_string(), "R$ 50000.00");
    }

    #[test]
    fn test_rate_from_f64() {
        let rate = Rate::from_f64(0.0349).unwrap();
        assert_eq!(rate.as_decimal(), dec!(0.0349));
        assert_eq!(rate.to_string(), "3.49%");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn money_round_trips_through_f64(cents in 0i64..5_000_000i64) {
            let money = Money::brl(Decimal::new(cents, 2));
            let back = Money::from_f64(money.to_f64(), Currency::BRL).unwrap();
            prop_assert_eq!(back, money);
        }

        #[test]
        fn money_sum_ignores_order(
            a in -1_000_000i64..1_000_000i64,
            b in -1_000_000i64..1_000_000i64,
            c in -1_000_000i64..1_000_000i64
        ) {
            let ma = Money::brl(Decimal::new(a, 2));
            let mb = Money::brl(Decimal::new(b, 2));
            let mc = Money::brl(Decimal::new(c, 2));

            let forward = Money::sum(&[ma, mb, mc], Currency::BRL);
            let backward = Money::sum(&[mc, mb, ma], Currency::BRL);
            prop_assert_eq!(forward, backward);
            prop_assert_eq!(forward.amount(), Decimal::new(a + b + c, 2));
        }
    }
}
