//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur while fetching the rate feed.
///
/// Every variant is terminal for the current fetch: the caller decides
/// whether to surface it or absorb it. Nothing in this crate retries.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The request never produced a response (DNS, connect, TLS, timeout).
    #[error("Network error: {provider} - {message}")]
    Network {
        /// The provider that was being called
        provider: String,
        /// The transport error message
        message: String,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Unexpected status from {provider}: {status}")]
    Status {
        /// The provider that answered
        provider: String,
        /// The HTTP status code
        status: u16,
    },

    /// The body could not be read as the expected document.
    #[error("Malformed payload from {provider}: {message}")]
    MalformedPayload {
        /// The provider that sent the body
        provider: String,
        /// What was wrong with it
        message: String,
    },
}
