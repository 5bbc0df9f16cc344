//! Exchange rates module - domain models, services, and traits.

mod fx_model;
mod fx_service;
mod fx_traits;
pub mod rate_calculator;
mod rate_sync;

#[cfg(test)]
mod fx_service_tests;


pub use fx_model::{
    ConversionResult, ExchangeRate, ExchangeRateInput, ExchangeRateUpdate, ExchangeRateView,
    NewExchangeRate, RateSyncOutcome, RateSyncSummary,
};
pub use fx_service::ExchangeRateService;
pub use fx_traits::{ExchangeRateRepositoryTrait, ExchangeRateServiceTrait, RateSyncServiceTrait};
pub use rate_calculator::{convert_amount, cross_rate, per_unit_rate, RateLeg};
pub use rate_sync::RateSyncService;
