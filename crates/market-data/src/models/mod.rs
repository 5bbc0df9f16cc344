//! Feed data models.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single feed entry: the price of `nominal` units of a currency in the
/// feed's base currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRate {
    pub nominal: i32,
    pub value: Decimal,
}

/// The full rate table returned by one feed fetch, keyed by upper-case code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSnapshot {
    rates: HashMap<String, FeedRate>,
}

impl FeedSnapshot {
    pub fn new(rates: HashMap<String, FeedRate>) -> Self {
        let rates = rates
            .into_iter()
            .map(|(code, rate)| (code.to_uppercase(), rate))
            .collect();
        Self { rates }
    }

    /// Looks up a currency by code, case-insensitively.
    pub fn get(&self, code: &str) -> Option<&FeedRate> {
        self.rates.get(&code.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(String, FeedRate)> for FeedSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, FeedRate)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
