//! Cross-rate and conversion arithmetic.
//!
//! Stored rates are prices of `nominal` units of a currency in the base
//! currency. Every cross rate is reduced to per-unit prices first and then
//! divided, so the same formula covers the base and non-base cases.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{AMOUNT_PRECISION, CROSS_RATE_PRECISION};
use crate::errors::{Error, Result};

/// One side of a cross-rate computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLeg {
    /// The base currency itself (per-unit price of 1).
    Base,
    /// A currency with a stored rate.
    Quoted { nominal: i32, rate: Decimal },
}

fn half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Price of one unit of a currency in the base currency, at 12 fractional digits.
pub fn per_unit_rate(rate: Decimal, nominal: i32) -> Result<Decimal> {
    if nominal <= 0 {
        return Err(Error::ConversionFailed(format!(
            "nominal must be positive, got {}",
            nominal
        )));
    }
    rate.checked_div(Decimal::from(nominal))
        .map(|per_unit| half_up(per_unit, CROSS_RATE_PRECISION))
        .ok_or_else(|| Error::ConversionFailed(format!("cannot divide {} by {}", rate, nominal)))
}

/// Units of `to` per one unit of `from`, at 12 fractional digits, half-up.
pub fn cross_rate(from: RateLeg, to: RateLeg) -> Result<Decimal> {
    match (from, to) {
        (RateLeg::Base, RateLeg::Base) => Ok(Decimal::ONE),
        (RateLeg::Quoted { nominal, rate }, RateLeg::Base) => per_unit_rate(rate, nominal),
        (from, to) => {
            let from_per_unit = leg_per_unit(from)?;
            let to_per_unit = leg_per_unit(to)?;
            from_per_unit
                .checked_div(to_per_unit)
                .map(|cross| half_up(cross, CROSS_RATE_PRECISION))
                .ok_or_else(|| {
                    Error::ConversionFailed(format!(
                        "cannot divide {} by {}",
                        from_per_unit, to_per_unit
                    ))
                })
        }
    }
}

fn leg_per_unit(leg: RateLeg) -> Result<Decimal> {
    match leg {
        RateLeg::Base => Ok(Decimal::ONE),
        RateLeg::Quoted { nominal, rate } => per_unit_rate(rate, nominal),
    }
}

/// `amount * rate`, rounded half-up to exactly 2 fractional digits.
pub fn convert_amount(amount: Decimal, rate: Decimal) -> Result<Decimal> {
    let mut converted = amount
        .checked_mul(rate)
        .map(|converted| half_up(converted, AMOUNT_PRECISION))
        .ok_or_else(|| Error::ConversionFailed(format!("{} x {} overflows", amount, rate)))?;
    converted.rescale(AMOUNT_PRECISION);
    Ok(converted)
}
