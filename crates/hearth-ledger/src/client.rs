//! # Ledger Client
//!
//! Thin call-wrapper over [`SettlementChain`]: each operation submits,
//! awaits the confirmed receipt, and decodes the one event the operation
//! must have emitted. `open` additionally runs the funding preflight the
//! original performed before `createEscrow` — balance check first, then an
//! allowance top-up toward the escrow manager when the current allowance
//! is below the amount.
//!
//! The client never gates on local state or local clocks; role, state,
//! and deadline checks belong to the ledger. Local checks exist only in
//! the coordinator, and only to decide what to offer.

use hearth_core::{Address, EscrowId, TokenAmount};

use crate::chain::SettlementChain;
use crate::error::LedgerError;
use crate::events::{
    expect_event, Arbitrated, AutoReleased, Disputed, EscrowCreated, Released,
};
use crate::session::WalletSession;

/// Typed client for the escrow manager, bound to a wallet session.
#[derive(Debug)]
pub struct LedgerClient<C> {
    chain: C,
    session: WalletSession,
    manager: Address,
}

impl<C: SettlementChain> LedgerClient<C> {
    /// Build a client for `chain`, acting as `session`, against the escrow
    /// manager deployed at `manager`.
    pub fn new(chain: C, session: WalletSession, manager: Address) -> Self {
        Self {
            chain,
            session,
            manager,
        }
    }

    /// The session this client acts as.
    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    /// Open an escrow and return the decoded `EscrowCreated` event.
    ///
    /// Preflight: fails with [`LedgerError::InsufficientBalance`] before
    /// any submission when the caller cannot cover `amount`; submits an
    /// approval and awaits it when the manager's allowance is below
    /// `amount`. An approval failure (including a declined signature)
    /// aborts the attempt before `create_escrow` is submitted.
    pub async fn open(
        &self,
        seller: &Address,
        arbiter: &Address,
        amount: TokenAmount,
        timeout_secs: u64,
    ) -> Result<EscrowCreated, LedgerError> {
        let caller = self.session.account();

        let balance = self.chain.balance_of(caller).await?;
        if balance < amount {
            return Err(LedgerError::InsufficientBalance {
                required: amount,
                available: balance,
            });
        }

        let allowance = self.chain.allowance(caller, &self.manager).await?;
        if allowance < amount {
            let receipt = self.chain.approve(caller, &self.manager, amount).await?;
            tracing::debug!(tx = %receipt.tx, %amount, "allowance raised for escrow manager");
        }

        let receipt = self
            .chain
            .create_escrow(caller, seller, arbiter, amount, timeout_secs)
            .await?;
        let event: EscrowCreated = expect_event(&receipt)?;
        tracing::info!(id = %event.id, tx = %receipt.tx, "escrow opened on ledger");
        Ok(event)
    }

    /// Release escrowed funds to the seller (buyer only, pending only —
    /// enforced by the ledger).
    pub async fn release(&self, id: EscrowId) -> Result<Released, LedgerError> {
        let receipt = self.chain.release(self.session.account(), id).await?;
        expect_event(&receipt)
    }

    /// Raise a dispute (buyer only, pending only — enforced by the ledger).
    pub async fn dispute(&self, id: EscrowId) -> Result<Disputed, LedgerError> {
        let receipt = self.chain.dispute(self.session.account(), id).await?;
        expect_event(&receipt)
    }

    /// Claim funds after the timeout (seller only; the deadline is checked
    /// authoritatively on-chain).
    pub async fn auto_release(&self, id: EscrowId) -> Result<AutoReleased, LedgerError> {
        let receipt = self.chain.auto_release(self.session.account(), id).await?;
        expect_event(&receipt)
    }

    /// Resolve a dispute (arbiter only, disputed only — enforced by the
    /// ledger).
    pub async fn arbitrate(
        &self,
        id: EscrowId,
        release_to_seller: bool,
    ) -> Result<Arbitrated, LedgerError> {
        let receipt = self
            .chain
            .arbitrate(self.session.account(), id, release_to_seller)
            .await?;
        expect_event(&receipt)
    }
}
