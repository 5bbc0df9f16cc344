use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;

use crate::currencies::{Currency, CurrencyRepositoryTrait};
use crate::errors::{EntityKind, Error, Result};
use crate::validation::{
    normalize_code, validate_exchange_rate_input, validate_exchange_rate_update,
};

use super::fx_model::{
    ConversionResult, ExchangeRate, ExchangeRateInput, ExchangeRateUpdate, ExchangeRateView,
    NewExchangeRate,
};
use super::fx_traits::{ExchangeRateRepositoryTrait, ExchangeRateServiceTrait};
use super::rate_calculator::{convert_amount, cross_rate, RateLeg};

/// Exchange rate CRUD and cross-rate queries against a single base currency.
pub struct ExchangeRateService {
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    rate_repository: Arc<dyn ExchangeRateRepositoryTrait>,
    base_currency: String,
}

impl ExchangeRateService {
    pub fn new(
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        rate_repository: Arc<dyn ExchangeRateRepositoryTrait>,
        base_currency: &str,
    ) -> Self {
        ExchangeRateService {
            currency_repository,
            rate_repository,
            base_currency: normalize_code(base_currency),
        }
    }

    fn find_currency(&self, code: &str) -> Result<Currency> {
        self.currency_repository
            .get_by_code(code)?
            .ok_or_else(|| Error::not_found(EntityKind::Currency, code))
    }

    /// Loads a currency and its rate. `code` must already be normalized.
    fn find_rate(&self, code: &str) -> Result<(Currency, ExchangeRate)> {
        let currency = self.find_currency(code)?;
        let rate = self
            .rate_repository
            .get_by_currency_id(currency.id)?
            .ok_or_else(|| Error::not_found(EntityKind::ExchangeRate, code))?;
        Ok((currency, rate))
    }

    fn leg(&self, code: &str) -> Result<RateLeg> {
        if code == self.base_currency {
            return Ok(RateLeg::Base);
        }
        let (_, rate) = self.find_rate(code)?;
        Ok(RateLeg::Quoted {
            nominal: rate.nominal,
            rate: rate.rate,
        })
    }
}

#[async_trait]
impl ExchangeRateServiceTrait for ExchangeRateService {
    fn base_currency(&self) -> &str {
        &self.base_currency
    }

    fn get_exchange_rates(&self) -> Result<Vec<ExchangeRateView>> {
        self.rate_repository
            .list()?
            .into_iter()
            .map(|rate| {
                let currency = self
                    .currency_repository
                    .get_by_id(rate.currency_id)?
                    .ok_or_else(|| {
                        Error::not_found(EntityKind::Currency, rate.currency_id.to_string())
                    })?;
                Ok(ExchangeRateView::new(rate, currency))
            })
            .collect()
    }

    fn get_exchange_rate(&self, currency_code: &str) -> Result<ExchangeRateView> {
        let (currency, rate) = self.find_rate(&normalize_code(currency_code))?;
        Ok(ExchangeRateView::new(rate, currency))
    }

    async fn add_exchange_rate(&self, input: ExchangeRateInput) -> Result<ExchangeRateView> {
        let validated = validate_exchange_rate_input(&input)?;
        let currency = self.find_currency(&validated.currency_code)?;

        if self.rate_repository.exists_by_currency_id(currency.id)? {
            return Err(Error::duplicate(EntityKind::ExchangeRate, currency.code));
        }

        let rate = self
            .rate_repository
            .insert(NewExchangeRate {
                currency_id: currency.id,
                nominal: validated.values.nominal,
                rate: validated.values.rate,
            })
            .await?;
        info!(
            "Created exchange rate for {}: {} per {}",
            currency.code, rate.rate, rate.nominal
        );
        Ok(ExchangeRateView::new(rate, currency))
    }

    async fn update_exchange_rate(
        &self,
        currency_code: &str,
        update: ExchangeRateUpdate,
    ) -> Result<ExchangeRateView> {
        let validated = validate_exchange_rate_update(currency_code, &update)?;
        let (currency, mut rate) = self.find_rate(&validated.currency_code)?;

        rate.nominal = validated.values.nominal;
        rate.rate = validated.values.rate;
        let rate = self.rate_repository.update(rate).await?;
        Ok(ExchangeRateView::new(rate, currency))
    }

    async fn delete_exchange_rate(&self, currency_code: &str) -> Result<()> {
        let (currency, rate) = self.find_rate(&normalize_code(currency_code))?;
        self.rate_repository.delete(rate.id).await?;
        info!("Deleted exchange rate for {}", currency.code);
        Ok(())
    }

    fn calculate_cross_rate(&self, from: &str, to: &str) -> Result<Decimal> {
        let from = normalize_code(from);
        let to = normalize_code(to);
        if from == to {
            return Ok(Decimal::ONE);
        }

        let rate = cross_rate(self.leg(&from)?, self.leg(&to)?)?;
        debug!("Cross rate {} -> {} = {}", from, to, rate);
        Ok(rate)
    }

    fn convert(&self, from: &str, to: &str, amount: Decimal) -> Result<ConversionResult> {
        let rate = self.calculate_cross_rate(from, to)?;
        Ok(ConversionResult {
            from: normalize_code(from),
            to: normalize_code(to),
            rate,
            amount,
            converted_amount: convert_amount(amount, rate)?,
        })
    }
}
