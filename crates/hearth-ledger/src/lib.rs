//! # hearth-ledger — Client for the Authoritative Escrow Ledger
//!
//! The escrow manager contract on the settlement chain owns fund custody
//! and state-transition enforcement. This crate wraps its five mutating
//! operations behind a typed client without reimplementing any of its
//! rules:
//!
//! - [`chain::SettlementChain`] — the transport seam: token reads, the
//!   approval call, and the five escrow submissions, each resolving to a
//!   confirmed [`chain::TxReceipt`] carrying the transaction's raw logs.
//! - [`events`] — the typed decoder mapping a receipt's log set to the one
//!   event each operation must emit. A confirmed receipt without the
//!   expected event is a distinct failure
//!   ([`error::LedgerError::EventMissing`]), never silent success.
//! - [`client::LedgerClient`] — balance preflight and allowance top-up
//!   before `create_escrow`, thin submission for the rest, event decoding
//!   for all.
//! - [`session::WalletSession`] — the caller's identity, connected and
//!   disconnected explicitly rather than held in ambient global state.
//! - [`sim::SimLedger`] (feature `sim`, on by default) — a deterministic
//!   in-memory chain that enforces the authoritative rules and emits logs,
//!   for tests and the local sandbox.
//!
//! ## Failure Semantics
//!
//! No operation is retried automatically. A failed attempt (declined
//! signature, reverted transaction, insufficient funds) is terminal for
//! that attempt; manual retry is safe because the ledger rejects
//! out-of-state or unauthorized resubmissions.

pub mod chain;
pub mod client;
pub mod error;
pub mod events;
pub mod session;
#[cfg(feature = "sim")]
pub mod sim;

pub use chain::{RawLog, SettlementChain, TxReceipt};
pub use client::LedgerClient;
pub use error::LedgerError;
pub use events::{
    Arbitrated, AutoReleased, Disputed, EscrowCreated, EventKind, LedgerEvent, Released,
};
pub use session::WalletSession;
#[cfg(feature = "sim")]
pub use sim::{SimLedger, SimState};
