//! # hearth-escrow — The Escrow Lifecycle Coordinator
//!
//! The one piece of this system with real protocol complexity: the state
//! machine governing an escrow from creation to terminal resolution, and
//! the write protocol keeping the off-chain mirror consistent with the
//! authoritative ledger.
//!
//! ## States
//!
//! ```text
//! (open) ──▶ pending ──▶ completed          buyer release /
//!               │                           seller auto-release after timeout
//!               ▼
//!           disputed ──▶ completed          arbitrate → seller
//!               │
//!               ▼
//!            refunded                       arbitrate → buyer
//! ```
//!
//! `completed` and `refunded` are terminal.
//!
//! ## Layers
//!
//! - [`machine`] — the pure transition table, auto-release eligibility,
//!   and role-scoped action offering. No I/O, exhaustively testable.
//! - [`coordinator`] — orchestration: precondition check against the
//!   mirrored record, ledger call, event decode, and the
//!   escrow-plus-listing mirror projection as one logical unit.
//!
//! ## Consistency Contract
//!
//! The ledger is the source of truth; the mirror is written only after a
//! ledger call confirms and its event decodes. A ledger failure writes
//! nothing. A mirror failure after ledger success is surfaced as
//! [`error::CoordinatorError::MirrorDiverged`] — the projection can be
//! re-derived from the ledger's event log, so the condition is
//! recoverable, but it must never be swallowed.

pub mod coordinator;
pub mod error;
pub mod machine;

pub use coordinator::{EscrowCoordinator, OpenEscrowRequest};
pub use error::CoordinatorError;
pub use machine::{
    auto_release_eligible, available_actions, plan_transition, projected_outcome, EscrowAction,
    Projection, TransitionError,
};
