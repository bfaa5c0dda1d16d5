//! # Ledger Failure Taxonomy
//!
//! Every failure class a ledger call can surface, kept distinct so the
//! coordinator and the presentation layer can react differently to each:
//! a declined signature reads differently to the user than a revert, and a
//! confirmed transaction missing its event is more severe than either.

use thiserror::Error;

use hearth_core::TokenAmount;

use crate::events::EventKind;

/// Errors surfaced by ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The caller's settlement token balance is below the escrow amount.
    /// Fatal to the attempt; detected in preflight before any submission.
    #[error("insufficient settlement token balance: need {required}, have {available}")]
    InsufficientBalance {
        /// The escrow amount requested.
        required: TokenAmount,
        /// The caller's current balance.
        available: TokenAmount,
    },

    /// The user declined to sign the transaction. A clean abort — nothing
    /// was submitted and no state changed anywhere.
    #[error("transaction signature declined by the user")]
    TransactionRejected,

    /// The ledger rejected or failed the submission: wrong role, wrong
    /// state, deadline not met, or a transport failure. Surfaced
    /// generically; the ledger's rejection is authoritative.
    #[error("chain error: {0}")]
    Chain(String),

    /// The transaction confirmed but the operation's expected event is
    /// absent from its logs. Indicates the local assumption about the
    /// contract's behavior is wrong — must be reported, never treated as
    /// success.
    #[error("transaction confirmed but expected {expected} event is absent from the logs")]
    EventMissing {
        /// The event the operation was required to emit.
        expected: EventKind,
    },

    /// A log carried the expected event name but its payload did not
    /// decode into the event's shape.
    #[error("malformed {kind} event payload: {detail}")]
    MalformedEvent {
        /// The event whose payload failed to decode.
        kind: EventKind,
        /// Decoder detail.
        detail: String,
    },
}
