//! Currencies module - domain models, services, and traits.

mod currencies_model;
mod currencies_service;
mod currencies_traits;


pub use currencies_model::{Currency, CurrencyInput, CurrencyUpdate, NewCurrency};
pub use currencies_service::CurrencyService;
pub use currencies_traits::{CurrencyRepositoryTrait, CurrencyServiceTrait};
