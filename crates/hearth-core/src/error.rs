//! # Error Types — Core Validation Failures
//!
//! Boundary-validation errors for the core primitives. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! Higher layers (ledger client, mirror adapter, coordinator) define their
//! own error enums and wrap these where a primitive fails to parse.

use thiserror::Error;

/// Validation errors raised by the core primitive constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HearthError {
    /// A chain address failed the `0x` + 40-hex-digit shape check.
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A token amount string could not be parsed as a positive decimal.
    #[error("invalid token amount {input:?}: {reason}")]
    InvalidAmount {
        /// The rejected input.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A timestamp string or epoch value was out of range or malformed.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A status string did not name a known escrow or listing status.
    #[error("unknown status {0:?}")]
    UnknownStatus(String),
}
