//! Ratekeeper Market Data Crate
//!
//! This crate fetches the current exchange-rate table from an external feed
//! and hands it to the domain core as plain data.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+
//! |  RateSyncService | --> |    RateFeed      |  (trait, this crate)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          | CbrDailyProvider |  (central bank daily JSON)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   FeedSnapshot   |  (code -> nominal/value)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`RateFeed`] - A source of the current rate table
//! - [`FeedSnapshot`] - Rates keyed by upper-case currency code
//! - [`FeedRate`] - A single `{nominal, value}` entry
//! - [`FeedError`] - Fetch failures (transport, status, payload)

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::FeedError;
pub use models::{FeedRate, FeedSnapshot};
pub use provider::{CbrDailyProvider, RateFeed};
