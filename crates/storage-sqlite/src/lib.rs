//! SQLite storage implementation for Ratekeeper.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the repository traits defined in `ratekeeper-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for currencies and exchange rates
//! - Database-specific model types (with Diesel derives)
//! - Classification of driver errors into storage signals
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies exist.
//! The core crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!  storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```

pub mod currencies;
pub mod db;
pub mod errors;
pub mod fx;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    PoolConfig, WriteHandle,
};

// Re-export repositories
pub use currencies::CurrencyRepository;
pub use fx::ExchangeRateRepository;

// Re-export storage errors and conversion helpers
pub use errors::StorageError;

// Re-export from ratekeeper-core for convenience
pub use ratekeeper_core::errors::{DatabaseError, Error, Result};
