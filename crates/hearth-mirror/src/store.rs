//! # Projection Interface
//!
//! The operations the coordinator issues against the replica. Writes are
//! single-purpose status projections; the one read is the participant
//! query behind the dashboard (all escrows where the address appears as
//! buyer, seller, or arbiter).
//!
//! Implementations must fail fast rather than block: a write that cannot
//! complete within the backend's bounds surfaces a [`StoreError`] so the
//! coordinator can report the divergence instead of hanging the caller.

use thiserror::Error;

use hearth_core::{Address, EscrowId, EscrowStatus, ListingId, ListingStatus};

use crate::records::{EscrowRecord, ListingRecord, ParticipantEscrow};

/// Errors surfaced by mirror operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert collided with an existing escrow id.
    #[error("duplicate escrow id {0}")]
    DuplicateEscrow(EscrowId),

    /// A status update referenced an escrow the mirror does not hold.
    #[error("no mirrored escrow with id {0}")]
    UnknownEscrow(EscrowId),

    /// A record failed boundary validation.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The backend failed (connectivity, timeout, poisoned state).
    #[error("store backend error: {0}")]
    Backend(String),
}

/// The mirrored-state store as seen by the coordinator.
#[allow(async_fn_in_trait)]
pub trait MirrorStore: Send + Sync {
    /// Insert a freshly created escrow row. Validates the record and
    /// rejects duplicate ids.
    async fn insert_escrow(&self, record: EscrowRecord) -> Result<(), StoreError>;

    /// Project a confirmed status transition. `dispute_reason` is written
    /// only when provided (the dispute transition); other transitions
    /// leave it untouched.
    async fn update_escrow_status(
        &self,
        id: EscrowId,
        status: EscrowStatus,
        dispute_reason: Option<String>,
    ) -> Result<(), StoreError>;

    /// Project a listing status side effect. Upserts, since the listings
    /// subsystem itself is external and its rows may not be mirrored yet.
    async fn update_listing_status(
        &self,
        listing_id: ListingId,
        status: ListingStatus,
    ) -> Result<(), StoreError>;

    /// All escrows where `address` is the buyer, seller, or arbiter, each
    /// with the role scoped to this query.
    async fn escrows_for_participant(
        &self,
        address: &Address,
    ) -> Result<Vec<ParticipantEscrow>, StoreError>;

    /// A single mirrored escrow, if present.
    async fn get_escrow(&self, id: EscrowId) -> Result<Option<EscrowRecord>, StoreError>;

    /// A single mirrored listing, if present.
    async fn get_listing(&self, id: ListingId) -> Result<Option<ListingRecord>, StoreError>;
}
