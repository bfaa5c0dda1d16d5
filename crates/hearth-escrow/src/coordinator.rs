//! # Escrow Coordinator
//!
//! Orchestrates every escrow mutation end to end: precondition check
//! against the mirrored record, ledger submission through the client,
//! event decode, then the mirror projection (escrow row plus listing side
//! effect) as one logical unit.
//!
//! ## Write Protocol
//!
//! 1. Validate the request against the mirrored record. The mirror is a
//!    cache — when it has no row for the escrow, the check is skipped and
//!    the ledger's own enforcement decides.
//! 2. Invoke the ledger client; any failure propagates with no mirror
//!    write.
//! 3. On a decoded event, write the new escrow status (plus
//!    `dispute_reason` when disputing) and the listing side effect. A
//!    failure anywhere in this step is a divergence: the ledger advanced,
//!    the replica did not.
//!
//! The auto-release deadline is never checked here before submitting —
//! the ledger enforces it against its own clock. The local clock feeds
//! only [`offered_actions`](EscrowCoordinator::offered_actions).
//!
//! Operations take `&mut self`: one in-flight mutation per coordinator,
//! the same latch the original UI held while a submission was
//! outstanding.

use serde::{Deserialize, Serialize};

use hearth_core::{
    Address, EscrowId, EscrowStatus, ListingId, ListingStatus, Timestamp, TokenAmount,
};
use hearth_ledger::{LedgerClient, SettlementChain};
use hearth_mirror::{EscrowRecord, MirrorStore, ParticipantEscrow};

use crate::error::CoordinatorError;
use crate::machine::{
    auto_release_eligible, available_actions, plan_transition, projected_outcome, EscrowAction,
    Projection, TransitionError,
};

/// Everything needed to open an escrow against a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenEscrowRequest {
    /// The landlord receiving funds on release.
    pub seller: Address,
    /// The adjudicating arbiter.
    pub arbiter: Address,
    /// Display label for the arbiter.
    pub arbiter_name: String,
    /// Amount to escrow; must be positive.
    pub amount: TokenAmount,
    /// Seconds until the seller may claim via auto-release.
    pub timeout_secs: u64,
    /// Rental terms the arbiter adjudicates against.
    pub terms: String,
    /// The listing being rented.
    pub listing_id: ListingId,
    /// Denormalized listing title for the mirrored row.
    pub listing_title: String,
}

/// The escrow lifecycle coordinator, bound to one wallet session.
#[derive(Debug)]
pub struct EscrowCoordinator<C, S> {
    ledger: LedgerClient<C>,
    store: S,
}

impl<C: SettlementChain, S: MirrorStore> EscrowCoordinator<C, S> {
    /// Build a coordinator over a ledger client and a mirror store.
    pub fn new(ledger: LedgerClient<C>, store: S) -> Self {
        Self { ledger, store }
    }

    /// The connected account this coordinator acts as.
    pub fn account(&self) -> &Address {
        self.ledger.session().account()
    }

    /// Open an escrow: fund preflight and `create_escrow` through the
    /// ledger client, then mirror the new row and mark the listing
    /// escrowed.
    pub async fn open(&mut self, req: OpenEscrowRequest) -> Result<EscrowId, CoordinatorError> {
        if req.amount.is_zero() {
            return Err(CoordinatorError::InvalidRequest(
                "escrow amount must be positive".to_string(),
            ));
        }

        let event = self
            .ledger
            .open(&req.seller, &req.arbiter, req.amount, req.timeout_secs)
            .await?;

        // The mirrored row is built from the decoded event, not the
        // request: the ledger's answer is the single source of truth for
        // id, participants, and amount.
        let record = EscrowRecord {
            id: event.id,
            listing_id: req.listing_id,
            listing_title: req.listing_title,
            buyer_address: event.buyer,
            seller_address: event.seller,
            arbiter_address: event.arbiter,
            arbiter_name: req.arbiter_name,
            amount: event.amount,
            status: EscrowStatus::Pending,
            terms: req.terms,
            timeout_secs: event.timeout_secs,
            created_at: Timestamp::now(),
            dispute_reason: None,
        };
        let id = record.id;

        if let Err(source) = self.store.insert_escrow(record).await {
            return Err(self.diverged(id, source));
        }
        if let Err(source) = self
            .store
            .update_listing_status(req.listing_id, ListingStatus::Escrowed)
            .await
        {
            return Err(self.diverged(id, source));
        }
        tracing::info!(%id, listing = %req.listing_id, "escrow opened and mirrored");
        Ok(id)
    }

    /// Buyer releases funds to the seller.
    pub async fn release(
        &mut self,
        id: EscrowId,
        listing_id: ListingId,
    ) -> Result<(), CoordinatorError> {
        self.precheck(id, EscrowAction::Release, false).await?;
        let event = self.ledger.release(id).await?;
        let outcome = projected_outcome(EscrowAction::Release, false);
        self.project(event.id, outcome, None, listing_id).await
    }

    /// Buyer raises a dispute with a stated reason.
    pub async fn dispute(
        &mut self,
        id: EscrowId,
        reason: String,
        listing_id: ListingId,
    ) -> Result<(), CoordinatorError> {
        self.precheck(id, EscrowAction::Dispute, false).await?;
        let event = self.ledger.dispute(id).await?;
        let outcome = projected_outcome(EscrowAction::Dispute, false);
        self.project(event.id, outcome, Some(reason), listing_id).await
    }

    /// Seller claims funds after the timeout. The deadline is enforced by
    /// the ledger; an early attempt is rejected there with no state
    /// change anywhere.
    pub async fn auto_release(
        &mut self,
        id: EscrowId,
        listing_id: ListingId,
    ) -> Result<(), CoordinatorError> {
        self.precheck(id, EscrowAction::AutoRelease, false).await?;
        let event = self.ledger.auto_release(id).await?;
        let outcome = projected_outcome(EscrowAction::AutoRelease, false);
        self.project(event.id, outcome, None, listing_id).await
    }

    /// Arbiter resolves a dispute. The mirrored outcome follows the
    /// decoded event's decision, not the request argument.
    pub async fn arbitrate(
        &mut self,
        id: EscrowId,
        release_to_seller: bool,
        listing_id: ListingId,
    ) -> Result<(), CoordinatorError> {
        self.precheck(id, EscrowAction::Arbitrate, release_to_seller)
            .await?;
        let event = self.ledger.arbitrate(id, release_to_seller).await?;
        let outcome = projected_outcome(EscrowAction::Arbitrate, event.released_to_seller);
        self.project(event.id, outcome, None, listing_id).await
    }

    /// Every mirrored escrow where this account is the buyer, seller, or
    /// arbiter, with the role scoped to this account.
    pub async fn my_escrows(&self) -> Result<Vec<ParticipantEscrow>, CoordinatorError> {
        Ok(self.store.escrows_for_participant(self.account()).await?)
    }

    /// The actions to offer this account for a mirrored escrow at `now`.
    ///
    /// Time-dependent (auto-release eligibility), so callers must
    /// recompute on each render rather than caching the answer.
    pub fn offered_actions(
        &self,
        record: &EscrowRecord,
        now: Timestamp,
    ) -> &'static [EscrowAction] {
        match record.role_of(self.account()) {
            Some(role) => {
                let eligible =
                    auto_release_eligible(record.created_at, record.timeout_secs, now);
                available_actions(record.status, role, eligible)
            }
            None => &[],
        }
    }

    /// Validate role and state against the mirrored record before
    /// submitting. Skipped when the mirror has no row — the ledger's own
    /// enforcement then decides.
    async fn precheck(
        &self,
        id: EscrowId,
        action: EscrowAction,
        release_to_seller: bool,
    ) -> Result<(), CoordinatorError> {
        if let Some(record) = self.store.get_escrow(id).await? {
            let role = record
                .role_of(self.account())
                .ok_or(TransitionError::NotParticipant)?;
            plan_transition(record.status, role, action, release_to_seller)?;
        }
        Ok(())
    }

    /// Project a confirmed transition into the mirror as one logical
    /// unit. Any failure here is a divergence: the ledger has advanced
    /// and the replica has not.
    async fn project(
        &mut self,
        escrow_id: EscrowId,
        outcome: Projection,
        dispute_reason: Option<String>,
        listing_id: ListingId,
    ) -> Result<(), CoordinatorError> {
        if let Err(source) = self
            .store
            .update_escrow_status(escrow_id, outcome.escrow, dispute_reason)
            .await
        {
            return Err(self.diverged(escrow_id, source));
        }
        if let Err(source) = self
            .store
            .update_listing_status(listing_id, outcome.listing)
            .await
        {
            return Err(self.diverged(escrow_id, source));
        }
        tracing::info!(id = %escrow_id, status = %outcome.escrow, "transition mirrored");
        Ok(())
    }

    fn diverged(
        &self,
        escrow_id: EscrowId,
        source: hearth_mirror::StoreError,
    ) -> CoordinatorError {
        tracing::error!(
            id = %escrow_id,
            error = %source,
            "mirror projection failed after confirmed ledger transition; reconcile needed"
        );
        CoordinatorError::MirrorDiverged { escrow_id, source }
    }
}
