//! # Coordinator Failure Taxonomy
//!
//! Everything an escrow operation can surface to the presentation layer,
//! as a discriminated result — never a raised exception crossing the
//! ledger-call boundary silently.

use thiserror::Error;

use hearth_core::EscrowId;
use hearth_ledger::LedgerError;
use hearth_mirror::StoreError;

use crate::machine::TransitionError;

/// Errors surfaced by coordinator operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The request was malformed before any ledger contact.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The mirrored record shows the action cannot apply (wrong role,
    /// wrong state, terminal escrow). Nothing was submitted.
    #[error("precondition failed: {0}")]
    Precondition(#[from] TransitionError),

    /// The ledger call failed; no mirror write occurred. Carries the full
    /// ledger taxonomy, including the severe confirmed-without-event case.
    #[error("ledger operation failed: {0}")]
    Ledger(#[from] LedgerError),

    /// A mirror read failed before any ledger submission.
    #[error("mirror read failed: {0}")]
    Store(#[from] StoreError),

    /// The most dangerous class: the ledger transition confirmed but the
    /// mirror projection failed. The authoritative state has advanced and
    /// the replica has not; the mirror needs reconciling from the
    /// ledger's event log.
    #[error("escrow {escrow_id}: ledger transition confirmed but mirror projection failed, reconcile needed: {source}")]
    MirrorDiverged {
        /// The escrow whose projection is behind.
        escrow_id: EscrowId,
        /// The underlying store failure.
        #[source]
        source: StoreError,
    },
}
