use async_trait::async_trait;

use crate::currencies::currencies_model::{Currency, CurrencyInput, CurrencyUpdate, NewCurrency};
use crate::errors::Result;

/// Trait for currency repository operations.
///
/// Codes passed in are already normalized to upper case.
#[async_trait]
pub trait CurrencyRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<Currency>>;
    fn get_by_code(&self, code: &str) -> Result<Option<Currency>>;
    fn get_by_id(&self, id: i32) -> Result<Option<Currency>>;
    async fn insert(&self, new_currency: NewCurrency) -> Result<Currency>;
    async fn update(&self, currency: Currency) -> Result<Currency>;
    async fn delete(&self, code: &str) -> Result<usize>;
}

/// Trait for currency service operations
#[async_trait]
pub trait CurrencyServiceTrait: Send + Sync {
    fn get_currencies(&self) -> Result<Vec<Currency>>;
    fn get_currency(&self, code: &str) -> Result<Currency>;
    async fn add_currency(&self, input: CurrencyInput) -> Result<Currency>;
    async fn update_currency(&self, code: &str, update: CurrencyUpdate) -> Result<Currency>;
    async fn delete_currency(&self, code: &str) -> Result<()>;
}
