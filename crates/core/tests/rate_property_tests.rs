//! Property-based integration tests for cross rates, conversion and rate validation.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use ratekeeper_core::fx::{convert_amount, cross_rate, ExchangeRateInput, RateLeg};
use ratekeeper_core::validation::validate_exchange_rate_input;
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Generates a stored rate between 0.5 and 200 with up to 4 fractional digits.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (5_000i64..2_000_000).prop_map(|mantissa| Decimal::new(mantissa, 4))
}

/// Generates a nominal as published by central banks.
fn arb_nominal() -> impl Strategy<Value = i32> {
    prop_oneof![Just(1), Just(10), Just(100)]
}

/// Generates a currency quoted against the base.
fn arb_quoted_leg() -> impl Strategy<Value = RateLeg> {
    (arb_nominal(), arb_rate()).prop_map(|(nominal, rate)| RateLeg::Quoted { nominal, rate })
}

/// Generates a non-negative amount with 2 fractional digits, up to 1,000,000.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

/// Per-unit prices span 0.005..200, so a cross rate spans 2.5e-5..40000.
/// Rounding each direction to 12 digits (error <= 5e-13) moves the product of a
/// round trip by at most 5e-13 / 2.5e-5 = 2e-8.
fn tolerance() -> Decimal {
    Decimal::new(1, 7)
}

fn rate_input(rate: &str) -> ExchangeRateInput {
    ExchangeRateInput {
        currency_code: Some("USD".to_string()),
        nominal: Some("1".to_string()),
        rate: Some(rate.to_string()),
    }
}

// =============================================================================
// Cross rates
// =============================================================================

proptest! {
    #[test]
    fn cross_rate_round_trip_is_one(a in arb_quoted_leg(), b in arb_quoted_leg()) {
        let there = cross_rate(a, b).unwrap();
        let back = cross_rate(b, a).unwrap();
        prop_assert!((there * back - Decimal::ONE).abs() < tolerance(),
            "{} * {} drifted from 1", there, back);
    }

    #[test]
    fn cross_rate_through_base_round_trips(a in arb_quoted_leg()) {
        let to_base = cross_rate(a, RateLeg::Base).unwrap();
        let from_base = cross_rate(RateLeg::Base, a).unwrap();
        prop_assert!((to_base * from_base - Decimal::ONE).abs() < tolerance());
    }

    #[test]
    fn cross_rate_against_itself_is_one(a in arb_quoted_leg()) {
        prop_assert_eq!(cross_rate(a, a).unwrap(), Decimal::ONE);
    }

    #[test]
    fn cross_rate_keeps_twelve_fractional_digits(a in arb_quoted_leg(), b in arb_quoted_leg()) {
        let rate = cross_rate(a, b).unwrap();
        prop_assert!(rate.scale() <= 12);
        prop_assert!(rate > Decimal::ZERO);
    }
}

// =============================================================================
// Conversion
// =============================================================================

proptest! {
    #[test]
    fn converted_amount_has_two_digits(amount in arb_amount(), rate in arb_rate()) {
        let converted = convert_amount(amount, rate).unwrap();
        prop_assert!(converted.scale() <= 2);

        let exact = amount * rate;
        prop_assert!((converted - exact).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn converting_with_one_keeps_amount(amount in arb_amount()) {
        prop_assert_eq!(convert_amount(amount, Decimal::ONE).unwrap(), amount);
    }
}

// =============================================================================
// Rate validation
// =============================================================================

proptest! {
    #[test]
    fn rates_within_six_and_six_digits_are_accepted(
        integer in 0u32..1_000_000,
        fraction in 1u32..1_000_000,
    ) {
        let rate = format!("{}.{:06}", integer, fraction);
        prop_assert!(validate_exchange_rate_input(&rate_input(&rate)).is_ok(), "{}", rate);
    }

    #[test]
    fn rates_with_seven_fractional_digits_are_rejected(
        integer in 0u32..1_000_000,
        fraction in 1u32..10_000_000,
    ) {
        let rate = format!("{}.{:07}", integer, fraction);
        let errors = validate_exchange_rate_input(&rate_input(&rate)).unwrap_err();
        prop_assert!(errors.get("rate").is_some());
    }

    #[test]
    fn rates_with_seven_integer_digits_are_rejected(integer in 1_000_000u32..10_000_000) {
        let errors = validate_exchange_rate_input(&rate_input(&integer.to_string())).unwrap_err();
        prop_assert!(errors.get("rate").is_some());
    }
}
