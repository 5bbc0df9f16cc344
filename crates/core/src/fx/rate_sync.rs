//! Pulls the external rate feed into the store.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};
use ratekeeper_market_data::{FeedSnapshot, RateFeed};
use rust_decimal::Decimal;

use crate::currencies::{Currency, CurrencyRepositoryTrait};
use crate::errors::Result;

use super::fx_model::{NewExchangeRate, RateSyncOutcome, RateSyncSummary};
use super::fx_traits::{ExchangeRateRepositoryTrait, RateSyncServiceTrait};

pub struct RateSyncService {
    feed: Arc<dyn RateFeed>,
    currency_repository: Arc<dyn CurrencyRepositoryTrait>,
    rate_repository: Arc<dyn ExchangeRateRepositoryTrait>,
}

impl RateSyncService {
    pub fn new(
        feed: Arc<dyn RateFeed>,
        currency_repository: Arc<dyn CurrencyRepositoryTrait>,
        rate_repository: Arc<dyn ExchangeRateRepositoryTrait>,
    ) -> Self {
        RateSyncService {
            feed,
            currency_repository,
            rate_repository,
        }
    }

    /// Update-or-insert the rate of one currency from an already fetched snapshot.
    async fn apply(&self, snapshot: &FeedSnapshot, currency: &Currency) -> Result<RateSyncOutcome> {
        let Some(entry) = snapshot.get(&currency.code) else {
            warn!("No feed entry for {}, skipping", currency.code);
            return Ok(RateSyncOutcome::Skipped);
        };
        if entry.value <= Decimal::ZERO {
            warn!(
                "Feed rate for {} is not positive ({}), skipping",
                currency.code, entry.value
            );
            return Ok(RateSyncOutcome::Skipped);
        }

        match self.rate_repository.get_by_currency_id(currency.id)? {
            Some(mut existing) => {
                existing.nominal = entry.nominal;
                existing.rate = entry.value;
                self.rate_repository.update(existing).await?;
                debug!(
                    "Updated rate for {}: {} per {}",
                    currency.code, entry.value, entry.nominal
                );
                Ok(RateSyncOutcome::Updated)
            }
            None => {
                self.rate_repository
                    .insert(NewExchangeRate {
                        currency_id: currency.id,
                        nominal: entry.nominal,
                        rate: entry.value,
                    })
                    .await?;
                info!(
                    "Created rate for {}: {} per {}",
                    currency.code, entry.value, entry.nominal
                );
                Ok(RateSyncOutcome::Created)
            }
        }
    }
}

#[async_trait]
impl RateSyncServiceTrait for RateSyncService {
    async fn sync_all(&self) -> Result<RateSyncSummary> {
        let snapshot = self.feed.fetch_rates().await?;
        let currencies = self.currency_repository.list()?;
        debug!(
            "Syncing {} currencies against {} feed entries from {}",
            currencies.len(),
            snapshot.len(),
            self.feed.id()
        );

        let mut summary = RateSyncSummary::default();
        for currency in &currencies {
            // A storage error aborts the rest of the batch.
            let outcome = self.apply(&snapshot, currency).await?;
            summary.record(&currency.code, outcome);
        }

        info!(
            "Rate sync finished: {} created, {} updated, {} skipped",
            summary.created,
            summary.updated,
            summary.skipped.len()
        );
        Ok(summary)
    }

    async fn sync_one(&self, currency: &Currency) -> Result<RateSyncOutcome> {
        let snapshot = self.feed.fetch_rates().await?;
        self.apply(&snapshot, currency).await
    }
}
