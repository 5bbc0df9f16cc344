//! Ratekeeper Core - Domain entities, services, and traits.
//!
//! This crate contains the currency and exchange-rate engine: input
//! validation, storage error translation, cross-rate arithmetic, and the
//! services that coordinate currencies, their rates and the external feed.
//! It is database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod constants;
pub mod currencies;
pub mod errors;
pub mod fx;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
