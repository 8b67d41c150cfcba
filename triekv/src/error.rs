//! Error types for the store.

use thiserror::Error;

/// Errors returned by [`TrieKV`](crate::TrieKV).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KvError {
    /// A configuration field holds an unusable value.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A lookup that requires the key found nothing.
    #[error("key not found")]
    KeyNotFound,
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, KvError>;
