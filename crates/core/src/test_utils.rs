//! In-memory repositories and feeds shared by the service tests.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use ratekeeper_market_data::{FeedError, FeedRate, FeedSnapshot, RateFeed};
use rust_decimal::Decimal;

use crate::currencies::{Currency, CurrencyRepositoryTrait, NewCurrency};
use crate::errors::{
    translate_storage_error, DatabaseError, EntityKind, Error, Result, StorageOp,
};
use crate::fx::{
    ExchangeRate, ExchangeRateRepositoryTrait, NewExchangeRate, RateSyncOutcome,
    RateSyncServiceTrait, RateSyncSummary,
};

// ============== Mock Repositories ==============

#[derive(Default)]
pub struct MockCurrencyRepository {
    currencies: RwLock<Vec<Currency>>,
    next_id: Mutex<i32>,
}

impl MockCurrencyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(currencies: &[(&str, &str, &str)]) -> Self {
        let repo = Self::new();
        for (code, full_name, sign) in currencies {
            repo.push(code, full_name, sign);
        }
        repo
    }

    pub fn push(&self, code: &str, full_name: &str, sign: &str) -> Currency {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let currency = Currency {
            id: *next_id,
            code: code.to_string(),
            full_name: full_name.to_string(),
            sign: sign.to_string(),
        };
        self.currencies.write().unwrap().push(currency.clone());
        currency
    }

    pub fn currency(&self, code: &str) -> Currency {
        self.currencies
            .read()
            .unwrap()
            .iter()
            .find(|c| c.code == code)
            .cloned()
            .unwrap()
    }

    pub fn count(&self) -> usize {
        self.currencies.read().unwrap().len()
    }
}

#[async_trait]
impl CurrencyRepositoryTrait for MockCurrencyRepository {
    fn list(&self) -> Result<Vec<Currency>> {
        Ok(self.currencies.read().unwrap().clone())
    }

    fn get_by_code(&self, code: &str) -> Result<Option<Currency>> {
        Ok(self
            .currencies
            .read()
            .unwrap()
            .iter()
            .find(|c| c.code == code)
            .cloned())
    }

    fn get_by_id(&self, id: i32) -> Result<Option<Currency>> {
        Ok(self
            .currencies
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn insert(&self, new_currency: NewCurrency) -> Result<Currency> {
        if self.get_by_code(&new_currency.code)?.is_some() {
            return Err(translate_storage_error(
                DatabaseError::UniqueViolation("currency.code".to_string()),
                StorageOp::Insert,
                EntityKind::Currency,
                new_currency.code,
            ));
        }
        Ok(self.push(&new_currency.code, &new_currency.full_name, &new_currency.sign))
    }

    async fn update(&self, currency: Currency) -> Result<Currency> {
        let mut currencies = self.currencies.write().unwrap();
        let stored = currencies
            .iter_mut()
            .find(|c| c.id == currency.id)
            .ok_or_else(|| Error::not_found(EntityKind::Currency, currency.code.clone()))?;
        *stored = currency.clone();
        Ok(currency)
    }

    async fn delete(&self, code: &str) -> Result<usize> {
        let mut currencies = self.currencies.write().unwrap();
        let before = currencies.len();
        currencies.retain(|c| c.code != code);
        Ok(before - currencies.len())
    }
}

#[derive(Default)]
pub struct MockExchangeRateRepository {
    rates: RwLock<Vec<ExchangeRate>>,
    next_id: Mutex<i32>,
    fail_writes_for: RwLock<Option<i32>>,
}

impl MockExchangeRateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, currency_id: i32, nominal: i32, rate: Decimal) -> ExchangeRate {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let rate = ExchangeRate {
            id: *next_id,
            currency_id,
            nominal,
            rate,
        };
        self.rates.write().unwrap().push(rate.clone());
        rate
    }

    /// Makes every write touching `currency_id` fail as if storage were down.
    pub fn fail_writes_for(&self, currency_id: i32) {
        *self.fail_writes_for.write().unwrap() = Some(currency_id);
    }

    pub fn find(&self, currency_id: i32) -> Option<ExchangeRate> {
        self.rates
            .read()
            .unwrap()
            .iter()
            .find(|r| r.currency_id == currency_id)
            .cloned()
    }

    pub fn count(&self) -> usize {
        self.rates.read().unwrap().len()
    }

    fn check_write(&self, currency_id: i32) -> Result<()> {
        if *self.fail_writes_for.read().unwrap() == Some(currency_id) {
            return Err(DatabaseError::Unavailable("database is locked".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ExchangeRateRepositoryTrait for MockExchangeRateRepository {
    fn list(&self) -> Result<Vec<ExchangeRate>> {
        Ok(self.rates.read().unwrap().clone())
    }

    fn get_by_currency_id(&self, currency_id: i32) -> Result<Option<ExchangeRate>> {
        Ok(self.find(currency_id))
    }

    fn exists_by_currency_id(&self, currency_id: i32) -> Result<bool> {
        Ok(self.find(currency_id).is_some())
    }

    async fn insert(&self, new_rate: NewExchangeRate) -> Result<ExchangeRate> {
        self.check_write(new_rate.currency_id)?;
        Ok(self.push(new_rate.currency_id, new_rate.nominal, new_rate.rate))
    }

    async fn update(&self, rate: ExchangeRate) -> Result<ExchangeRate> {
        self.check_write(rate.currency_id)?;
        let mut rates = self.rates.write().unwrap();
        let stored = rates
            .iter_mut()
            .find(|r| r.id == rate.id)
            .ok_or_else(|| Error::not_found(EntityKind::ExchangeRate, rate.id.to_string()))?;
        *stored = rate.clone();
        Ok(rate)
    }

    async fn delete(&self, id: i32) -> Result<usize> {
        let mut rates = self.rates.write().unwrap();
        let before = rates.len();
        rates.retain(|r| r.id != id);
        Ok(before - rates.len())
    }
}

// ============== Mock Feed ==============

pub struct MockFeed {
    rates: HashMap<String, FeedRate>,
    fail: bool,
    calls: Mutex<usize>,
}

impl MockFeed {
    pub fn new(rates: &[(&str, i32, Decimal)]) -> Self {
        Self {
            rates: rates
                .iter()
                .map(|(code, nominal, value)| {
                    (
                        code.to_string(),
                        FeedRate {
                            nominal: *nominal,
                            value: *value,
                        },
                    )
                })
                .collect(),
            fail: false,
            calls: Mutex::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            rates: HashMap::new(),
            fail: true,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl RateFeed for MockFeed {
    fn id(&self) -> &'static str {
        "MOCK"
    }

    async fn fetch_rates(&self) -> std::result::Result<FeedSnapshot, FeedError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(FeedError::Status {
                provider: "MOCK".to_string(),
                status: 503,
            });
        }
        Ok(FeedSnapshot::new(self.rates.clone()))
    }
}

/// Sync stub recording which currencies it was asked about.
#[derive(Default)]
pub struct RecordingRateSync {
    pub synced: Mutex<Vec<String>>,
    pub fail: bool,
    pub delay: Duration,
}

impl RecordingRateSync {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Answers `sync_one` only after `delay`.
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RateSyncServiceTrait for RecordingRateSync {
    async fn sync_all(&self) -> Result<RateSyncSummary> {
        Ok(RateSyncSummary::default())
    }

    async fn sync_one(&self, currency: &Currency) -> Result<RateSyncOutcome> {
        self.synced.lock().unwrap().push(currency.code.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return Err(Error::Feed(FeedError::Network {
                provider: "MOCK".to_string(),
                message: "connection refused".to_string(),
            }));
        }
        Ok(RateSyncOutcome::Skipped)
    }
}
