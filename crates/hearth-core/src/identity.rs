//! # Ledger Identifiers
//!
//! Newtype wrappers for the two integer identifiers in the system. Both are
//! assigned elsewhere — escrow ids by the on-chain escrow manager at
//! creation, listing ids by the listings store — so neither type has a
//! generating constructor. The newtypes exist so an `EscrowId` can never be
//! passed where a `ListingId` is expected.

use serde::{Deserialize, Serialize};

/// Identifier of an escrow, assigned by the authoritative ledger at
/// creation. Immutable for the life of the escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EscrowId(pub u64);

/// Identifier of a rental listing in the listings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListingId(pub u64);

impl EscrowId {
    /// The raw numeric id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl ListingId {
    /// The raw numeric id.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EscrowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "escrow:{}", self.0)
    }
}

impl std::fmt::Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listing:{}", self.0)
    }
}
