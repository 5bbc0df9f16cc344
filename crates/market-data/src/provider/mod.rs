//! Rate feed abstractions and implementations.
//!
//! This module contains:
//! - The `RateFeed` trait that all feeds implement
//! - The central bank daily JSON provider

mod traits;

pub mod cbr_daily;

pub use cbr_daily::CbrDailyProvider;
pub use traits::RateFeed;
