//! Exchange rate domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currencies::Currency;

/// Domain model representing a stored exchange rate: the price of `nominal`
/// units of a currency in the base currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub id: i32,
    pub currency_id: i32,
    pub nominal: i32,
    pub rate: Decimal,
}

/// Validated model for creating a new exchange rate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewExchangeRate {
    pub currency_id: i32,
    pub nominal: i32,
    pub rate: Decimal,
}

/// Raw input for creating an exchange rate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateInput {
    pub currency_code: Option<String>,
    pub nominal: Option<String>,
    pub rate: Option<String>,
}

/// Raw input for updating the exchange rate of a currency
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateUpdate {
    pub nominal: Option<String>,
    pub rate: Option<String>,
}

/// An exchange rate together with the currency it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateView {
    pub id: i32,
    pub currency: Currency,
    pub nominal: i32,
    pub rate: Decimal,
}

impl ExchangeRateView {
    pub fn new(rate: ExchangeRate, currency: Currency) -> Self {
        Self {
            id: rate.id,
            currency,
            nominal: rate.nominal,
            rate: rate.rate,
        }
    }
}

/// Result of converting an amount of one currency into another
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub from: String,
    pub to: String,
    pub rate: Decimal,
    pub amount: Decimal,
    pub converted_amount: Decimal,
}

/// What a sync did for a single currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum RateSyncOutcome {
    Created,
    Updated,
    /// The feed carries no usable entry for the currency
    Skipped,
}

/// Totals of a full sync run
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RateSyncSummary {
    pub created: usize,
    pub updated: usize,
    pub skipped: Vec<String>,
}

impl RateSyncSummary {
    pub fn record(&mut self, code: &str, outcome: RateSyncOutcome) {
        match outcome {
            RateSyncOutcome::Created => self.created += 1,
            RateSyncOutcome::Updated => self.updated += 1,
            RateSyncOutcome::Skipped => self.skipped.push(code.to_string()),
        }
    }
}
