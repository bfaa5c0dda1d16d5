//! # Settlement Chain Transport
//!
//! The seam between the client and the chain. Implementations submit
//! transactions, await finality, and hand back the confirmed receipt with
//! its raw logs; all interpretation (event decoding, error taxonomy above
//! the transport) lives in the layers on top.
//!
//! Mock and real implementations are interchangeable at this trait, the
//! same way the workspace swaps proof systems behind a trait elsewhere.
//! The authoritative rules — role checks, state checks, the auto-release
//! deadline — are enforced on the other side of this boundary and are
//! never duplicated as local gatekeeping.

use serde::{Deserialize, Serialize};

use hearth_core::{Address, EscrowId, TokenAmount};

use crate::error::LedgerError;

/// A single raw log entry from a confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLog {
    /// Event name, e.g. `"EscrowCreated"`.
    pub name: String,
    /// Event payload as emitted.
    pub data: serde_json::Value,
}

/// A confirmed transaction receipt.
///
/// Existence of a receipt means the transaction was mined successfully;
/// reverts and rejections surface as [`LedgerError`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction identifier, for logs and reconciliation.
    pub tx: String,
    /// The transaction's emitted logs, in order.
    pub logs: Vec<RawLog>,
}

/// Transport to the settlement chain: the settlement token's read/approve
/// surface and the escrow manager's five mutating operations.
///
/// Every method suspends until the submission is confirmed or fails. The
/// signature step is human-speed and cancellable (surfacing
/// [`LedgerError::TransactionRejected`]); once submitted, confirmation is
/// not cancellable.
#[allow(async_fn_in_trait)]
pub trait SettlementChain: Send + Sync {
    /// The caller's settlement token balance.
    async fn balance_of(&self, owner: &Address) -> Result<TokenAmount, LedgerError>;

    /// The amount `spender` may move on behalf of `owner`.
    async fn allowance(
        &self,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount, LedgerError>;

    /// Authorize `spender` to move up to `amount` of the caller's tokens.
    async fn approve(
        &self,
        caller: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<TxReceipt, LedgerError>;

    /// Open an escrow; the manager pulls `amount` from the caller's
    /// balance. Emits `EscrowCreated`.
    async fn create_escrow(
        &self,
        caller: &Address,
        seller: &Address,
        arbiter: &Address,
        amount: TokenAmount,
        timeout_secs: u64,
    ) -> Result<TxReceipt, LedgerError>;

    /// Buyer releases funds to the seller. Emits `Released`.
    async fn release(&self, caller: &Address, id: EscrowId) -> Result<TxReceipt, LedgerError>;

    /// Buyer raises a dispute. Emits `Disputed`.
    async fn dispute(&self, caller: &Address, id: EscrowId) -> Result<TxReceipt, LedgerError>;

    /// Seller claims funds after the timeout has elapsed. The deadline is
    /// checked authoritatively on-chain. Emits `AutoReleased`.
    async fn auto_release(&self, caller: &Address, id: EscrowId)
        -> Result<TxReceipt, LedgerError>;

    /// Arbiter resolves a dispute, sending the full amount to one side.
    /// Emits `Arbitrated`.
    async fn arbitrate(
        &self,
        caller: &Address,
        id: EscrowId,
        release_to_seller: bool,
    ) -> Result<TxReceipt, LedgerError>;
}
