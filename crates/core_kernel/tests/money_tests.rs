//! Unit tests for the Money and Rate types
//!
//! Tests cover creation, cent rounding and arithmetic.

use core_kernel::{Currency, Money, MoneyError, Rate};
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_default_currency_is_brl() {
        assert_eq!(Currency::default(), Currency::BRL);
        assert_eq!(Currency::BRL.symbol(), "R$");
    }

    #[test]
    fn test_new_rounds_to_cents() {
        let m = Money::brl(dec!(1034.2305580905506));
        assert_eq!(m.amount(), dec!(1034.23));
    }

    #[test]
    fn test_zero() {
        let m = Money::zero(Currency::BRL);
        assert!(m.is_zero());
        assert_eq!(m.to_string(), "R$ 0.00");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_divide_by_zero() {
        let m = Money::brl(dec!(100));
        assert_eq!(m.divide(dec!(0)), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_divide_rounds_half_away() {
        let m = Money::brl(dec!(100));
        assert_eq!(m.divide(dec!(3)).unwrap().amount(), dec!(33.33));
        assert_eq!(Money::brl(dec!(0.05)).divide(dec!(2)).unwrap().amount(), dec!(0.03));
    }

    #[test]
    fn test_sum_keeps_negative_amounts() {
        let items = vec![Money::brl(dec!(2410.76)), Money::brl(dec!(-0.02))];
        assert_eq!(Money::sum(&items, Currency::BRL).amount(), dec!(2410.74));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let items: Vec<Money> = Vec::new();
        assert!(Money::sum(&items, Currency::BRL).is_zero());
    }
}

mod rates {
    use super::*;

    #[test]
    fn test_from_f64_keeps_four_places() {
        let rate = Rate::from_f64(0.03496).unwrap();
        assert_eq!(rate.as_decimal(), dec!(0.0350));
        assert_eq!(rate.to_f64(), 0.035);
    }

    #[test]
    fn test_zero_rate() {
        let rate = Rate::from_f64(0.0).unwrap();
        assert_eq!(rate.as_decimal(), dec!(0));
        assert_eq!(rate.to_f64(), 0.0);
    }

    #[test]
    fn test_rate_rejects_nan() {
        assert!(Rate::from_f64(f64::NAN).is_err());
    }
}
