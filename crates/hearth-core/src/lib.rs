//! # hearth-core — Foundational Types for Hearth
//!
//! Hearth coordinates the lifecycle of rental escrows held by an external
//! on-chain escrow manager. This crate is the bedrock of the workspace: it
//! defines the validated domain primitives every other crate speaks in.
//! It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `Address`, `EscrowId`,
//!    `ListingId`, `TokenAmount` — all newtypes with validated constructors.
//!    No bare strings for identifiers, no floats for money.
//!
//! 2. **Addresses are normalized at the boundary.** `Address::parse()` is the
//!    only way to build one: `0x` + 40 hex digits, lowercased on entry so
//!    equality checks across the ledger, the mirror, and caller input never
//!    depend on checksum casing.
//!
//! 3. **Amounts are fixed-point base units.** `TokenAmount` holds 18-decimal
//!    base units of the settlement token in a `u128`. Decimal strings are
//!    parsed exactly; float construction does not exist.
//!
//! 4. **UTC-only timestamps.** `Timestamp` enforces UTC with seconds
//!    precision, so elapsed-time arithmetic for auto-release eligibility is
//!    deterministic.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `hearth-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod address;
pub mod amount;
pub mod error;
pub mod identity;
pub mod status;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use address::Address;
pub use amount::TokenAmount;
pub use error::HearthError;
pub use identity::{EscrowId, ListingId};
pub use status::{EscrowStatus, ListingStatus, Role};
pub use temporal::Timestamp;
