//! # hearth-mirror — Off-Chain Mirrored-State Store Adapter
//!
//! The authoritative escrow state lives on the ledger; reading it for
//! every list view would be slow and unfilterable. This crate is the
//! adapter for the off-chain replica used for display: validated record
//! types, the projection interface the coordinator writes through, and an
//! in-memory backend.
//!
//! ## Consistency Contract
//!
//! The mirror is a passive projection — no business rules live here.
//! Writes are issued by exactly one party: the coordinator that just
//! confirmed the corresponding ledger transition. Reads may briefly trail
//! the ledger (eventual consistency); they never lead it.
//!
//! Records are validated at this boundary. A malformed row (bad address,
//! zero amount, unknown status) is rejected with a structured error
//! instead of flowing upward as untyped data.

pub mod memory;
pub mod records;
pub mod store;

pub use memory::{MemoryStore, StoreData};
pub use records::{EscrowRecord, ListingRecord, ParticipantEscrow};
pub use store::{MirrorStore, StoreError};
