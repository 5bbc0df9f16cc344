use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::constants::DEFAULT_INITIAL_RATE_TIMEOUT_SECS;
use crate::errors::{EntityKind, Error, Result};
use crate::fx::{ExchangeRateRepositoryTrait, RateSyncServiceTrait};
use crate::validation::{normalize_code, validate_currency_input, validate_currency_update};

use super::currencies_model::{Currency, CurrencyInput, CurrencyUpdate};
use super::currencies_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};

pub struct CurrencyService {
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    rate_repository: Arc<dyn ExchangeRateRepositoryTrait>,
    rate_sync: Arc<dyn RateSyncServiceTrait>,
    initial_rate_timeout: Duration,
}

impl CurrencyService {
    pub fn new(
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        rate_repository: Arc<dyn ExchangeRateRepositoryTrait>,
        rate_sync: Arc<dyn RateSyncServiceTrait>,
    ) -> Self {
        CurrencyService {
            currency_repository,
            rate_repository,
            rate_sync,
            initial_rate_timeout: Duration::from_secs(DEFAULT_INITIAL_RATE_TIMEOUT_SECS),
        }
    }

    /// Caps how long `add_currency` waits for the initial rate.
    pub fn with_initial_rate_timeout(mut self, timeout: Duration) -> Self {
        self.initial_rate_timeout = timeout;
        self
    }

    fn find(&self, code: &str) -> Result<Currency> {
        let code = normalize_code(code);
        self.currency_repository
            .get_by_code(&code)?
            .ok_or_else(|| Error::not_found(EntityKind::Currency, code))
    }
}

#[async_trait]
impl CurrencyServiceTrait for CurrencyService {
    fn get_currencies(&self) -> Result<Vec<Currency>> {
        self.currency_repository.list()
    }

    fn get_currency(&self, code: &str) -> Result<Currency> {
        self.find(code)
    }

    async fn add_currency(&self, input: CurrencyInput) -> Result<Currency> {
        let new_currency = validate_currency_input(&input)?;

        if self
            .currency_repository
            .get_by_code(&new_currency.code)?
            .is_some()
        {
            return Err(Error::duplicate(EntityKind::Currency, new_currency.code));
        }

        let currency = self.currency_repository.insert(new_currency).await?;
        info!("Created currency {} (id {})", currency.code, currency.id);

        // Initial rate is best effort; the currency stays created either way.
        let initial_rate =
            tokio::time::timeout(self.initial_rate_timeout, self.rate_sync.sync_one(&currency));
        match initial_rate.await {
            Ok(Ok(outcome)) => debug!("Initial rate for {}: {:?}", currency.code, outcome),
            Ok(Err(e)) => warn!("Failed to fetch initial rate for {}: {}", currency.code, e),
            Err(_) => warn!(
                "Initial rate fetch for {} timed out after {:?}",
                currency.code, self.initial_rate_timeout
            ),
        }

        Ok(currency)
    }

    async fn update_currency(&self, code: &str, update: CurrencyUpdate) -> Result<Currency> {
        let validated = validate_currency_update(code, &update)?;
        let mut currency = self.find(&validated.code)?;

        currency.full_name = validated.full_name;
        currency.sign = validated.sign;
        self.currency_repository.update(currency).await
    }

    async fn delete_currency(&self, code: &str) -> Result<()> {
        let currency = self.find(code)?;

        if self.rate_repository.exists_by_currency_id(currency.id)? {
            return Err(Error::in_use(EntityKind::Currency, currency.code));
        }

        self.currency_repository.delete(&currency.code).await?;
        info!("Deleted currency {}", currency.code);
        Ok(())
    }
}
