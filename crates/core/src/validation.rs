//! Field validation for currency and exchange rate input.
//!
//! Every check runs on every request and all violations are returned
//! together, keyed by input field name.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::constants::{
    CURRENCY_CODE_LENGTH, MAX_FULL_NAME_LENGTH, MAX_RATE_FRACTION_DIGITS,
    MAX_RATE_INTEGER_DIGITS, MAX_SIGN_LENGTH,
};
use crate::currencies::{CurrencyInput, CurrencyUpdate, NewCurrency};
use crate::errors::ValidationError;
use crate::fx::{ExchangeRateInput, ExchangeRateUpdate};

pub const FIELD_CODE: &str = "code";
pub const FIELD_FULL_NAME: &str = "fullName";
pub const FIELD_SIGN: &str = "sign";
pub const FIELD_NOMINAL: &str = "nominal";
pub const FIELD_RATE: &str = "rate";

/// Checked `nominal`/`rate` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateValues {
    pub nominal: i32,
    pub rate: Decimal,
}

/// Checked exchange rate input, with the code normalized to upper case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExchangeRate {
    pub currency_code: String,
    pub values: RateValues,
}

/// Normalizes a currency code for lookups and persistence.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

pub fn validate_currency_input(input: &CurrencyInput) -> Result<NewCurrency, ValidationError> {
    let mut errors = ValidationError::new();
    let code = check_code(input.code.as_deref(), &mut errors);
    let details = check_details(input.full_name.as_deref(), input.sign.as_deref(), &mut errors);

    match (code, details) {
        (Some(code), Some((full_name, sign))) => Ok(NewCurrency {
            code,
            full_name,
            sign,
        }),
        _ => Err(errors),
    }
}

/// Validates the code addressing a currency together with its new details.
pub fn validate_currency_update(
    code: &str,
    update: &CurrencyUpdate,
) -> Result<NewCurrency, ValidationError> {
    let mut errors = ValidationError::new();
    let code = check_code(Some(code), &mut errors);
    let details = check_details(update.full_name.as_deref(), update.sign.as_deref(), &mut errors);

    match (code, details) {
        (Some(code), Some((full_name, sign))) => Ok(NewCurrency {
            code,
            full_name,
            sign,
        }),
        _ => Err(errors),
    }
}

pub fn validate_exchange_rate_input(
    input: &ExchangeRateInput,
) -> Result<ValidatedExchangeRate, ValidationError> {
    let mut errors = ValidationError::new();
    let code = check_code(input.currency_code.as_deref(), &mut errors);
    let values = check_rate_values(input.nominal.as_deref(), input.rate.as_deref(), &mut errors);

    match (code, values) {
        (Some(currency_code), Some(values)) => Ok(ValidatedExchangeRate {
            currency_code,
            values,
        }),
        _ => Err(errors),
    }
}

/// Validates the code addressing a rate together with its new values.
pub fn validate_exchange_rate_update(
    currency_code: &str,
    update: &ExchangeRateUpdate,
) -> Result<ValidatedExchangeRate, ValidationError> {
    let mut errors = ValidationError::new();
    let code = check_code(Some(currency_code), &mut errors);
    let values = check_rate_values(update.nominal.as_deref(), update.rate.as_deref(), &mut errors);

    match (code, values) {
        (Some(currency_code), Some(values)) => Ok(ValidatedExchangeRate {
            currency_code,
            values,
        }),
        _ => Err(errors),
    }
}

// Each check below yields a value exactly when it recorded no error for its
// field, so a fully populated result implies an empty error map.

fn check_code(raw: Option<&str>, errors: &mut ValidationError) -> Option<String> {
    let code = match raw.map(str::trim) {
        None | Some("") => {
            errors.add(FIELD_CODE, "Currency code is required.");
            return None;
        }
        Some(code) => code,
    };

    if code.chars().count() != CURRENCY_CODE_LENGTH {
        errors.add(FIELD_CODE, "Currency code must be 3 characters long.");
        return None;
    }
    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        errors.add(FIELD_CODE, "Currency code must contain only letters.");
        return None;
    }
    Some(code.to_uppercase())
}

fn check_details(
    full_name: Option<&str>,
    sign: Option<&str>,
    errors: &mut ValidationError,
) -> Option<(String, String)> {
    let full_name = match full_name.map(str::trim) {
        None | Some("") => {
            errors.add(FIELD_FULL_NAME, "Full name is required.");
            None
        }
        Some(name) if name.chars().count() > MAX_FULL_NAME_LENGTH => {
            errors.add(
                FIELD_FULL_NAME,
                "Full name cannot be longer than 100 characters.",
            );
            None
        }
        Some(name) => Some(name.to_string()),
    };

    let sign = match sign {
        None => {
            errors.add(
                FIELD_SIGN,
                "Currency sign is required (can be empty, but not null).",
            );
            None
        }
        Some(sign) if sign.chars().count() > MAX_SIGN_LENGTH => {
            errors.add(FIELD_SIGN, "Currency sign cannot be longer than 5 characters.");
            None
        }
        Some(sign) => Some(sign.to_string()),
    };

    full_name.zip(sign)
}

fn check_rate_values(
    nominal: Option<&str>,
    rate: Option<&str>,
    errors: &mut ValidationError,
) -> Option<RateValues> {
    let nominal = match nominal.map(str::trim) {
        None | Some("") => {
            errors.add(FIELD_NOMINAL, "Nominal is required.");
            None
        }
        Some(raw) => match raw.parse::<i32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                errors.add(FIELD_NOMINAL, "Nominal must be a positive integer.");
                None
            }
        },
    };

    let rate = match rate.map(str::trim) {
        None | Some("") => {
            errors.add(FIELD_RATE, "Rate is required.");
            None
        }
        Some(raw) => check_rate(raw, errors),
    };

    match (nominal, rate) {
        (Some(nominal), Some(rate)) => Some(RateValues { nominal, rate }),
        _ => None,
    }
}

fn check_rate(raw: &str, errors: &mut ValidationError) -> Option<Decimal> {
    // `Decimal::from_str` tolerates `_` digit separators.
    let parsed = if raw.contains('_') {
        None
    } else {
        Decimal::from_str(raw).ok()
    };
    let rate = match parsed {
        Some(rate) if rate > Decimal::ZERO => rate,
        _ => {
            errors.add(FIELD_RATE, "Rate must be a positive number.");
            return None;
        }
    };

    if integer_digits(&rate) > MAX_RATE_INTEGER_DIGITS {
        errors.add(
            FIELD_RATE,
            "Rate cannot have more than 6 digits before the decimal point.",
        );
        return None;
    }
    if rate.scale() > MAX_RATE_FRACTION_DIGITS {
        errors.add(
            FIELD_RATE,
            "Rate cannot have more than 6 digits after the decimal point.",
        );
        return None;
    }
    Some(rate)
}

/// Precision minus scale: the digits left of the decimal point.
fn integer_digits(value: &Decimal) -> u32 {
    let precision = value.mantissa().unsigned_abs().to_string().len() as u32;
    precision.saturating_sub(value.scale())
}
