use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::currencies::Currency;
use crate::errors::Result;
use crate::fx::fx_model::{
    ConversionResult, ExchangeRate, ExchangeRateInput, ExchangeRateUpdate, ExchangeRateView,
    NewExchangeRate, RateSyncOutcome, RateSyncSummary,
};

/// Trait for exchange rate repository operations.
///
/// At most one rate exists per currency id.
#[async_trait]
pub trait ExchangeRateRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<ExchangeRate>>;
    fn get_by_currency_id(&self, currency_id: i32) -> Result<Option<ExchangeRate>>;
    fn exists_by_currency_id(&self, currency_id: i32) -> Result<bool>;
    async fn insert(&self, new_rate: NewExchangeRate) -> Result<ExchangeRate>;
    async fn update(&self, rate: ExchangeRate) -> Result<ExchangeRate>;
    async fn delete(&self, id: i32) -> Result<usize>;
}

/// Trait for exchange rate service operations
#[async_trait]
pub trait ExchangeRateServiceTrait: Send + Sync {
    fn base_currency(&self) -> &str;
    fn get_exchange_rates(&self) -> Result<Vec<ExchangeRateView>>;
    fn get_exchange_rate(&self, currency_code: &str) -> Result<ExchangeRateView>;
    async fn add_exchange_rate(&self, input: ExchangeRateInput) -> Result<ExchangeRateView>;
    async fn update_exchange_rate(
        &self,
        currency_code: &str,
        update: ExchangeRateUpdate,
    ) -> Result<ExchangeRateView>;
    async fn delete_exchange_rate(&self, currency_code: &str) -> Result<()>;

    /// Units of `to` per one unit of `from`.
    fn calculate_cross_rate(&self, from: &str, to: &str) -> Result<Decimal>;

    /// Converts `amount` of `from` into `to`.
    fn convert(&self, from: &str, to: &str, amount: Decimal) -> Result<ConversionResult>;
}

/// Trait for pulling rates from the external feed into the store
#[async_trait]
pub trait RateSyncServiceTrait: Send + Sync {
    /// Upserts rates for every stored currency the feed knows about.
    async fn sync_all(&self) -> Result<RateSyncSummary>;

    /// Upserts the rate of a single currency.
    async fn sync_one(&self, currency: &Currency) -> Result<RateSyncOutcome>;
}
