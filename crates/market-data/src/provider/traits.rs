//! Rate feed trait definition.

use async_trait::async_trait;

use crate::errors::FeedError;
use crate::models::FeedSnapshot;

/// A source of the current exchange-rate table.
///
/// Implementations fetch the whole table in one call; callers pick the
/// entries they need out of the returned [`FeedSnapshot`].
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use ratekeeper_market_data::{FeedError, FeedSnapshot, RateFeed};
///
/// struct FixedFeed(FeedSnapshot);
///
/// #[async_trait]
/// impl RateFeed for FixedFeed {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_rates(&self) -> Result<FeedSnapshot, FeedError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait RateFeed: Send + Sync {
    /// Unique identifier for this feed, used in logs and errors.
    fn id(&self) -> &'static str;

    /// Fetch the current rate table.
    ///
    /// Fails on transport errors, non-success statuses and unreadable bodies.
    async fn fetch_rates(&self) -> Result<FeedSnapshot, FeedError>;
}
