//! Currency domain models.

use serde::{Deserialize, Serialize};

/// Domain model representing a stored currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub id: i32,
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

/// Validated model for creating a new currency
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewCurrency {
    pub code: String,
    pub full_name: String,
    pub sign: String,
}

/// Raw input for creating a currency, as received from a caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyInput {
    pub code: Option<String>,
    pub full_name: Option<String>,
    pub sign: Option<String>,
}

/// Raw input for updating a currency. The code is the immutable business key
/// and is not part of the update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyUpdate {
    pub full_name: Option<String>,
    pub sign: Option<String>,
}
