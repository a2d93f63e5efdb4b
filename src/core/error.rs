//! Error types for the feed core.
//!
//! Every failure here is local and recoverable: the caller logs it, clears
//! whatever guard was set, and keeps the UI running.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The data provider could not produce a page.
    #[error("provider unavailable at offset {offset}: {reason}")]
    ProviderUnavailable { offset: usize, reason: String },

    /// A config value could not be parsed.
    #[error("invalid config value for `{key}`: {value}")]
    InvalidConfig { key: String, value: String },
}
