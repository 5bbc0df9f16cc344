//! Central bank daily rates provider.
//!
//! Fetches the daily JSON document published at
//! `https://www.cbr-xml-daily.ru/daily_json.js`. Rates are expressed in RUB
//! and live under the `Valute` object, keyed by currency code:
//!
//! ```text
//! {
//!   "Date": "2024-05-21T11:30:00+03:00",
//!   "Valute": {
//!     "USD": { "CharCode": "USD", "Nominal": 1, "Value": 90.0658, ... },
//!     "JPY": { "CharCode": "JPY", "Nominal": 100, "Value": 57.7711, ... }
//!   }
//! }
//! ```

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::FeedError;
use crate::models::{FeedRate, FeedSnapshot};
use crate::provider::RateFeed;

/// Provider ID constant
const PROVIDER_ID: &str = "CBR_DAILY";

/// Default feed location
pub const DEFAULT_FEED_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct DailyResponse {
    #[serde(rename = "Valute")]
    valute: HashMap<String, DailyEntry>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    #[serde(rename = "Nominal")]
    nominal: serde_json::Value,
    #[serde(rename = "Value")]
    value: serde_json::Value,
}

/// Central bank daily JSON provider.
///
/// # Example
///
/// ```ignore
/// use ratekeeper_market_data::CbrDailyProvider;
///
/// let provider = CbrDailyProvider::new();
/// let snapshot = provider.fetch_rates().await?;
/// ```
pub struct CbrDailyProvider {
    client: Client,
    url: String,
}

impl CbrDailyProvider {
    pub fn new() -> Self {
        Self::with_url(DEFAULT_FEED_URL, REQUEST_TIMEOUT)
    }

    /// Create a provider pointing at a custom URL (mirrors, test servers).
    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse a daily document into a snapshot.
    ///
    /// Entries with an unreadable value or a non-positive nominal are
    /// dropped with a warning; a body that is not the expected document
    /// fails the whole parse.
    pub fn parse_payload(body: &str) -> Result<FeedSnapshot, FeedError> {
        let response: DailyResponse =
            serde_json::from_str(body).map_err(|e| FeedError::MalformedPayload {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let mut rates = HashMap::with_capacity(response.valute.len());
        for (code, entry) in response.valute {
            let Some(nominal) = parse_nominal(&entry.nominal) else {
                warn!(code = %code, nominal = %entry.nominal, "Skipping feed entry with invalid nominal");
                continue;
            };
            let Some(value) = parse_value(&entry.value) else {
                warn!(code = %code, value = %entry.value, "Skipping feed entry with invalid value");
                continue;
            };
            rates.insert(code, FeedRate { nominal, value });
        }

        Ok(FeedSnapshot::new(rates))
    }
}

impl Default for CbrDailyProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_nominal(raw: &serde_json::Value) -> Option<i32> {
    let nominal = match raw {
        serde_json::Value::Number(n) => n.as_i64()?,
        serde_json::Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(nominal).ok().filter(|n| *n > 0)
}

/// Reads the value through its textual form so the decimal keeps the
/// digits the feed published.
fn parse_value(raw: &serde_json::Value) -> Option<Decimal> {
    let text = match raw {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().replace(',', "."),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

#[async_trait]
impl RateFeed for CbrDailyProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_rates(&self) -> Result<FeedSnapshot, FeedError> {
        debug!(url = %self.url, "Fetching daily rates");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FeedError::Network {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FeedError::Network {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })?;

        let snapshot = Self::parse_payload(&body)?;
        debug!(entries = snapshot.len(), "Parsed daily rates");
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: &str = r#"{
        "Date": "2024-05-21T11:30:00+03:00",
        "PreviousDate": "2024-05-18T11:30:00+03:00",
        "Timestamp": "2024-05-20T20:00:00+03:00",
        "Valute": {
            "USD": {"ID": "R01235", "NumCode": "840", "CharCode": "USD", "Nominal": 1, "Name": "Доллар США", "Value": 90.0658, "Previous": 90.7493},
            "JPY": {"ID": "R01820", "NumCode": "392", "CharCode": "JPY", "Nominal": 100, "Name": "Японских иен", "Value": 57.7711, "Previous": 58.0223},
            "EUR": {"ID": "R01239", "NumCode": "978", "CharCode": "EUR", "Nominal": 1, "Name": "Евро", "Value": "97.8136", "Previous": 98.6097}
        }
    }"#;

    #[test]
    fn test_parse_payload() {
        let snapshot = CbrDailyProvider::parse_payload(SAMPLE).unwrap();

        assert_eq!(snapshot.len(), 3);
        let usd = snapshot.get("USD").unwrap();
        assert_eq!(usd.nominal, 1);
        assert_eq!(usd.value, dec!(90.0658));

        let jpy = snapshot.get("JPY").unwrap();
        assert_eq!(jpy.nominal, 100);
        assert_eq!(jpy.value, dec!(57.7711));

        // Textual values are accepted as well
        assert_eq!(snapshot.get("EUR").unwrap().value, dec!(97.8136));
    }

    #[test]
    fn test_parse_payload_trailing_zeros() {
        let body = r#"{"Valute": {"KZT": {"Nominal": 100, "Value": 20.1000}}}"#;
        let snapshot = CbrDailyProvider::parse_payload(body).unwrap();
        assert_eq!(snapshot.get("KZT").unwrap().value, dec!(20.1));
    }

    #[test]
    fn test_parse_payload_skips_invalid_entries() {
        let body = r#"{"Valute": {
            "USD": {"Nominal": 1, "Value": 90.0658},
            "BAD": {"Nominal": 0, "Value": 1.0},
            "NAN": {"Nominal": 1, "Value": "abc"}
        }}"#;
        let snapshot = CbrDailyProvider::parse_payload(body).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.get("BAD").is_none());
        assert!(snapshot.get("NAN").is_none());
    }

    #[test]
    fn test_parse_payload_without_valute_fails() {
        let result = CbrDailyProvider::parse_payload(r#"{"Date": "2024-05-21"}"#);
        assert!(matches!(result, Err(FeedError::MalformedPayload { .. })));
    }

    #[test]
    fn test_parse_payload_not_json_fails() {
        let result = CbrDailyProvider::parse_payload("<html>maintenance</html>");
        assert!(matches!(result, Err(FeedError::MalformedPayload { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_network_error() {
        let provider =
            CbrDailyProvider::with_url("http://127.0.0.1:9/daily_json.js", Duration::from_secs(2));
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(FeedError::Network { .. })));
    }

    #[test]
    fn test_provider_id() {
        let provider = CbrDailyProvider::new();
        assert_eq!(provider.id(), "CBR_DAILY");
        assert_eq!(provider.url(), DEFAULT_FEED_URL);
    }
}
