//! # Simulated Settlement Chain
//!
//! A deterministic, in-memory implementation of [`SettlementChain`] for
//! tests and the local sandbox. It stands in for the authoritative ledger,
//! so it enforces the real rules — roles, states, the auto-release
//! deadline, balances and allowances — and emits the same log entries a
//! confirmed receipt would carry.
//!
//! Knobs for exercising failure paths:
//!
//! - [`SimLedger::reject_next_signature`] — the next submission fails as a
//!   declined signature, changing nothing.
//! - [`SimLedger::suppress_next_events`] — the next submission confirms
//!   but its receipt carries no logs, producing the
//!   confirmed-without-event condition.
//! - [`SimLedger::advance_clock`] — moves the chain clock forward for
//!   deadline scenarios; wall-clock time is used until the first advance.
//!
//! State snapshots serialize with `serde`, which is how the sandbox CLI
//! persists a chain between invocations.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use hearth_core::{Address, EscrowId, EscrowStatus, Timestamp, TokenAmount};

use crate::chain::{RawLog, SettlementChain, TxReceipt};
use crate::error::LedgerError;
use crate::events::{
    Arbitrated, AutoReleased, Disputed, EscrowCreated, LedgerEvent, Released,
};

// ─── State ───────────────────────────────────────────────────────────

/// One escrow as the ledger holds it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SimEscrow {
    buyer: Address,
    seller: Address,
    arbiter: Address,
    amount: TokenAmount,
    created_at_secs: i64,
    timeout_secs: u64,
    status: EscrowStatus,
}

/// The full chain state, serializable for sandbox persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    manager: Address,
    balances: HashMap<Address, TokenAmount>,
    // Allowances toward the escrow manager; it is the only spender here.
    allowances: HashMap<Address, TokenAmount>,
    escrows: BTreeMap<u64, SimEscrow>,
    next_id: u64,
    tx_counter: u64,
    clock_override_secs: Option<i64>,
    #[serde(skip)]
    reject_next_signature: bool,
    #[serde(skip)]
    suppress_next_events: bool,
}

impl SimState {
    fn new(manager: Address) -> Self {
        Self {
            manager,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            escrows: BTreeMap::new(),
            next_id: 1,
            tx_counter: 0,
            clock_override_secs: None,
            reject_next_signature: false,
            suppress_next_events: false,
        }
    }

    fn now_secs(&self) -> i64 {
        self.clock_override_secs
            .unwrap_or_else(|| Timestamp::now().epoch_secs())
    }

    fn signature_gate(&mut self) -> Result<(), LedgerError> {
        if self.reject_next_signature {
            self.reject_next_signature = false;
            return Err(LedgerError::TransactionRejected);
        }
        Ok(())
    }

    fn receipt(&mut self, event: LedgerEvent) -> TxReceipt {
        self.tx_counter += 1;
        let logs: Vec<RawLog> = if self.suppress_next_events {
            self.suppress_next_events = false;
            Vec::new()
        } else {
            vec![event.encode()]
        };
        TxReceipt {
            tx: format!("sim-{}", self.tx_counter),
            logs,
        }
    }

    fn credit(&mut self, account: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let balance = self
            .balances
            .entry(account.clone())
            .or_insert(TokenAmount::ZERO);
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Chain("balance overflow".to_string()))?;
        Ok(())
    }

    fn escrow_mut(&mut self, id: EscrowId) -> Result<&mut SimEscrow, LedgerError> {
        self.escrows
            .get_mut(&id.as_u64())
            .ok_or_else(|| LedgerError::Chain(format!("unknown escrow id {}", id.as_u64())))
    }
}

// ─── Ledger ──────────────────────────────────────────────────────────

/// Shared-handle simulated chain. Cloning shares the underlying state, so
/// a test can keep a handle for assertions after moving a clone into the
/// client.
#[derive(Debug, Clone)]
pub struct SimLedger {
    state: Arc<Mutex<SimState>>,
}

impl SimLedger {
    /// A fresh chain with the escrow manager deployed at `manager`.
    pub fn new(manager: Address) -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState::new(manager))),
        }
    }

    /// Rehydrate a chain from a persisted snapshot.
    pub fn from_state(state: SimState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Snapshot the full chain state for persistence.
    pub fn snapshot(&self) -> Result<SimState, LedgerError> {
        Ok(self.locked()?.clone())
    }

    /// The escrow manager's address on this chain.
    pub fn manager(&self) -> Result<Address, LedgerError> {
        Ok(self.locked()?.manager.clone())
    }

    /// Mint settlement tokens to an account.
    pub fn faucet(&self, account: &Address, amount: TokenAmount) -> Result<(), LedgerError> {
        let mut state = self.locked()?;
        state.credit(account, amount)?;
        tracing::debug!(account = %account.truncated(), %amount, "faucet minted tokens");
        Ok(())
    }

    /// Move the chain clock forward by `secs`. The first call pins the
    /// clock to a manual override seeded from the current effective time.
    pub fn advance_clock(&self, secs: u64) -> Result<(), LedgerError> {
        let mut state = self.locked()?;
        let now = state.now_secs();
        state.clock_override_secs = Some(now + secs as i64);
        Ok(())
    }

    /// Fail the next submission as a user-declined signature.
    pub fn reject_next_signature(&self) -> Result<(), LedgerError> {
        self.locked()?.reject_next_signature = true;
        Ok(())
    }

    /// Confirm the next submission with an empty log set.
    pub fn suppress_next_events(&self) -> Result<(), LedgerError> {
        self.locked()?.suppress_next_events = true;
        Ok(())
    }

    /// The on-chain status of an escrow, if it exists. Test/assertion
    /// helper; the coordinator reads status from the mirror, not from here.
    pub fn escrow_status(&self, id: EscrowId) -> Option<EscrowStatus> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.escrows.get(&id.as_u64()).map(|e| e.status))
    }

    fn locked(&self) -> Result<MutexGuard<'_, SimState>, LedgerError> {
        self.state
            .lock()
            .map_err(|_| LedgerError::Chain("simulated chain state poisoned".to_string()))
    }
}

impl SettlementChain for SimLedger {
    async fn balance_of(&self, owner: &Address) -> Result<TokenAmount, LedgerError> {
        Ok(self
            .locked()?
            .balances
            .get(owner)
            .copied()
            .unwrap_or(TokenAmount::ZERO))
    }

    async fn allowance(
        &self,
        owner: &Address,
        spender: &Address,
    ) -> Result<TokenAmount, LedgerError> {
        let state = self.locked()?;
        if spender != &state.manager {
            return Ok(TokenAmount::ZERO);
        }
        Ok(state
            .allowances
            .get(owner)
            .copied()
            .unwrap_or(TokenAmount::ZERO))
    }

    async fn approve(
        &self,
        caller: &Address,
        spender: &Address,
        amount: TokenAmount,
    ) -> Result<TxReceipt, LedgerError> {
        let mut state = self.locked()?;
        state.signature_gate()?;
        if spender != &state.manager {
            return Err(LedgerError::Chain(format!(
                "unknown spender {spender}"
            )));
        }
        state.allowances.insert(caller.clone(), amount);
        state.tx_counter += 1;
        Ok(TxReceipt {
            tx: format!("sim-{}", state.tx_counter),
            // Token approvals emit their own event; the escrow decoder
            // skips it as a foreign log.
            logs: vec![RawLog {
                name: "Approval".to_string(),
                data: serde_json::json!({
                    "owner": caller,
                    "spender": spender,
                    "amount": amount,
                }),
            }],
        })
    }

    async fn create_escrow(
        &self,
        caller: &Address,
        seller: &Address,
        arbiter: &Address,
        amount: TokenAmount,
        timeout_secs: u64,
    ) -> Result<TxReceipt, LedgerError> {
        let mut state = self.locked()?;
        state.signature_gate()?;

        if amount.is_zero() {
            return Err(LedgerError::Chain("escrow amount must be positive".to_string()));
        }
        let balance = state
            .balances
            .get(caller)
            .copied()
            .unwrap_or(TokenAmount::ZERO);
        if balance < amount {
            return Err(LedgerError::Chain(
                "transfer amount exceeds balance".to_string(),
            ));
        }
        let allowance = state
            .allowances
            .get(caller)
            .copied()
            .unwrap_or(TokenAmount::ZERO);
        if allowance < amount {
            return Err(LedgerError::Chain(
                "transfer amount exceeds allowance".to_string(),
            ));
        }

        // Pull funds into custody and burn the spent allowance.
        state.balances.insert(
            caller.clone(),
            balance.checked_sub(amount).unwrap_or(TokenAmount::ZERO),
        );
        state.allowances.insert(
            caller.clone(),
            allowance.checked_sub(amount).unwrap_or(TokenAmount::ZERO),
        );

        let id = EscrowId(state.next_id);
        state.next_id += 1;
        let created_at_secs = state.now_secs();
        state.escrows.insert(
            id.as_u64(),
            SimEscrow {
                buyer: caller.clone(),
                seller: seller.clone(),
                arbiter: arbiter.clone(),
                amount,
                created_at_secs,
                timeout_secs,
                status: EscrowStatus::Pending,
            },
        );

        let event = LedgerEvent::EscrowCreated(EscrowCreated {
            id,
            buyer: caller.clone(),
            seller: seller.clone(),
            arbiter: arbiter.clone(),
            amount,
            timeout_secs,
        });
        Ok(state.receipt(event))
    }

    async fn release(&self, caller: &Address, id: EscrowId) -> Result<TxReceipt, LedgerError> {
        let mut state = self.locked()?;
        state.signature_gate()?;

        let escrow = state.escrow_mut(id)?;
        if caller != &escrow.buyer {
            return Err(LedgerError::Chain("only the buyer may release".to_string()));
        }
        if escrow.status != EscrowStatus::Pending {
            return Err(LedgerError::Chain("escrow is not pending".to_string()));
        }
        escrow.status = EscrowStatus::Completed;
        let (seller, amount) = (escrow.seller.clone(), escrow.amount);
        state.credit(&seller, amount)?;

        let event = LedgerEvent::Released(Released { id });
        Ok(state.receipt(event))
    }

    async fn dispute(&self, caller: &Address, id: EscrowId) -> Result<TxReceipt, LedgerError> {
        let mut state = self.locked()?;
        state.signature_gate()?;

        let escrow = state.escrow_mut(id)?;
        if caller != &escrow.buyer {
            return Err(LedgerError::Chain("only the buyer may dispute".to_string()));
        }
        if escrow.status != EscrowStatus::Pending {
            return Err(LedgerError::Chain("escrow is not pending".to_string()));
        }
        escrow.status = EscrowStatus::Disputed;

        let event = LedgerEvent::Disputed(Disputed { id });
        Ok(state.receipt(event))
    }

    async fn auto_release(
        &self,
        caller: &Address,
        id: EscrowId,
    ) -> Result<TxReceipt, LedgerError> {
        let mut state = self.locked()?;
        state.signature_gate()?;

        let now = state.now_secs();
        let escrow = state.escrow_mut(id)?;
        if caller != &escrow.seller {
            return Err(LedgerError::Chain(
                "only the seller may auto-release".to_string(),
            ));
        }
        if escrow.status != EscrowStatus::Pending {
            return Err(LedgerError::Chain("escrow is not pending".to_string()));
        }
        let elapsed = (now - escrow.created_at_secs).max(0) as u64;
        if elapsed < escrow.timeout_secs {
            return Err(LedgerError::Chain(
                "auto-release deadline has not elapsed".to_string(),
            ));
        }
        escrow.status = EscrowStatus::Completed;
        let (seller, amount) = (escrow.seller.clone(), escrow.amount);
        state.credit(&seller, amount)?;

        let event = LedgerEvent::AutoReleased(AutoReleased { id });
        Ok(state.receipt(event))
    }

    async fn arbitrate(
        &self,
        caller: &Address,
        id: EscrowId,
        release_to_seller: bool,
    ) -> Result<TxReceipt, LedgerError> {
        let mut state = self.locked()?;
        state.signature_gate()?;

        let escrow = state.escrow_mut(id)?;
        if caller != &escrow.arbiter {
            return Err(LedgerError::Chain(
                "only the arbiter may arbitrate".to_string(),
            ));
        }
        if escrow.status != EscrowStatus::Disputed {
            return Err(LedgerError::Chain("escrow is not disputed".to_string()));
        }
        let recipient = if release_to_seller {
            escrow.status = EscrowStatus::Completed;
            escrow.seller.clone()
        } else {
            escrow.status = EscrowStatus::Refunded;
            escrow.buyer.clone()
        };
        let amount = escrow.amount;
        state.credit(&recipient, amount)?;

        let event = LedgerEvent::Arbitrated(Arbitrated {
            id,
            released_to_seller: release_to_seller,
        });
        Ok(state.receipt(event))
    }
}
