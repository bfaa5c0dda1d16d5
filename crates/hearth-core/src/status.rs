//! # Escrow Domain Enums
//!
//! The status enumerations and participant roles shared by the ledger
//! client, the mirrored store, and the coordinator. One definition each,
//! exhaustive `match` everywhere — adding a status forces every consumer
//! to handle it.
//!
//! ## States
//!
//! ```text
//! Escrow:   pending ──▶ completed   (buyer release / seller auto-release)
//!           pending ──▶ disputed    (buyer dispute)
//!           disputed ──▶ completed  (arbitrate → seller)
//!           disputed ──▶ refunded   (arbitrate → buyer)
//! ```
//!
//! `completed` and `refunded` are terminal. An `active` status appeared in
//! early UI drafts but the ledger's event wiring only ever produces
//! `pending` as the non-terminal awaiting state; `active` is not modeled.
//!
//! Statuses serialize lowercase, matching the string values stored in the
//! mirrored database.

use serde::{Deserialize, Serialize};

use crate::error::HearthError;

// ─── Escrow Status ───────────────────────────────────────────────────

/// The lifecycle status of an escrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscrowStatus {
    /// Funds are held; awaiting buyer release, dispute, or timeout.
    Pending,
    /// The buyer has raised a dispute; awaiting arbitration.
    Disputed,
    /// Funds have gone to the seller (terminal).
    Completed,
    /// Funds have gone back to the buyer (terminal).
    Refunded,
}

impl EscrowStatus {
    /// Whether this status is terminal — no operation may be applied.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Refunded)
    }

    /// Parse the lowercase database form.
    pub fn parse(s: &str) -> Result<Self, HearthError> {
        match s {
            "pending" => Ok(Self::Pending),
            "disputed" => Ok(Self::Disputed),
            "completed" => Ok(Self::Completed),
            "refunded" => Ok(Self::Refunded),
            other => Err(HearthError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Disputed => "disputed",
            Self::Completed => "completed",
            Self::Refunded => "refunded",
        };
        f.write_str(s)
    }
}

// ─── Listing Status ──────────────────────────────────────────────────

/// The rental status of a listing, updated as a side effect of escrow
/// transitions. The listing's own lifecycle lives in the listings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    /// Open for rental.
    Available,
    /// An escrow holds funds against this listing.
    Escrowed,
    /// The escrow against this listing is under dispute.
    Disputed,
    /// Rental completed; funds released to the landlord.
    Rented,
}

impl ListingStatus {
    /// Parse the lowercase database form.
    pub fn parse(s: &str) -> Result<Self, HearthError> {
        match s {
            "available" => Ok(Self::Available),
            "escrowed" => Ok(Self::Escrowed),
            "disputed" => Ok(Self::Disputed),
            "rented" => Ok(Self::Rented),
            other => Err(HearthError::UnknownStatus(other.to_string())),
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::Escrowed => "escrowed",
            Self::Disputed => "disputed",
            Self::Rented => "rented",
        };
        f.write_str(s)
    }
}

// ─── Participant Roles ───────────────────────────────────────────────

/// The role an account holds on a given escrow.
///
/// Roles derive solely from address equality against the escrow's three
/// participant addresses. One account may hold several roles across
/// different escrows (or coincidentally on the same one); the system does
/// not special-case that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The tenant paying into escrow.
    Buyer,
    /// The landlord receiving funds on release.
    Seller,
    /// The neutral party adjudicating disputes.
    Arbiter,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Arbiter => "arbiter",
        };
        f.write_str(s)
    }
}
