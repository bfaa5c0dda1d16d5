//! # Ledger Events — Typed Receipt Decoding
//!
//! Each successful escrow operation emits exactly one event into the
//! confirmed transaction's log set. This module maps that log set to typed
//! event payloads, failing explicitly when the expected tag is absent
//! rather than returning a null-ish placeholder.
//!
//! Logs not emitted by the escrow manager (token transfers, unrelated
//! contracts) are skipped, matching how the original log scan tolerates
//! foreign entries while searching for its event by name.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use hearth_core::{Address, EscrowId, TokenAmount};

use crate::chain::{RawLog, TxReceipt};
use crate::error::LedgerError;

// ─── Event Kinds ─────────────────────────────────────────────────────

/// The five events the escrow manager emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// Emitted by `create_escrow`.
    EscrowCreated,
    /// Emitted by `release`.
    Released,
    /// Emitted by `dispute`.
    Disputed,
    /// Emitted by `arbitrate`.
    Arbitrated,
    /// Emitted by `auto_release`.
    AutoReleased,
}

impl EventKind {
    /// The event name as it appears in a log entry.
    pub fn name(&self) -> &'static str {
        match self {
            Self::EscrowCreated => "EscrowCreated",
            Self::Released => "Released",
            Self::Disputed => "Disputed",
            Self::Arbitrated => "Arbitrated",
            Self::AutoReleased => "AutoReleased",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Event Payloads ──────────────────────────────────────────────────

/// Payload of the `EscrowCreated` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowCreated {
    /// The ledger-assigned escrow id.
    pub id: EscrowId,
    /// The creating buyer.
    pub buyer: Address,
    /// The seller.
    pub seller: Address,
    /// The arbiter.
    pub arbiter: Address,
    /// The escrowed amount.
    pub amount: TokenAmount,
    /// Seconds after creation at which auto-release becomes eligible.
    pub timeout_secs: u64,
}

/// Payload of the `Released` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Released {
    /// The released escrow.
    pub id: EscrowId,
}

/// Payload of the `Disputed` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disputed {
    /// The disputed escrow.
    pub id: EscrowId,
}

/// Payload of the `Arbitrated` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arbitrated {
    /// The arbitrated escrow.
    pub id: EscrowId,
    /// `true` when the full amount went to the seller, `false` when it was
    /// refunded to the buyer. Arbitration is binary — no partial splits.
    pub released_to_seller: bool,
}

/// Payload of the `AutoReleased` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoReleased {
    /// The auto-released escrow.
    pub id: EscrowId,
}

// ─── Tagged Union ────────────────────────────────────────────────────

/// A decoded escrow manager event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// An escrow was created.
    EscrowCreated(EscrowCreated),
    /// The buyer released funds to the seller.
    Released(Released),
    /// The buyer raised a dispute.
    Disputed(Disputed),
    /// The arbiter resolved a dispute.
    Arbitrated(Arbitrated),
    /// The seller claimed funds after the timeout.
    AutoReleased(AutoReleased),
}

impl LedgerEvent {
    /// The kind tag of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::EscrowCreated(_) => EventKind::EscrowCreated,
            Self::Released(_) => EventKind::Released,
            Self::Disputed(_) => EventKind::Disputed,
            Self::Arbitrated(_) => EventKind::Arbitrated,
            Self::AutoReleased(_) => EventKind::AutoReleased,
        }
    }

    /// Decode a raw log entry.
    ///
    /// Returns `Ok(None)` for logs whose name is not an escrow manager
    /// event (they belong to other contracts in the same transaction) and
    /// [`LedgerError::MalformedEvent`] when a recognized name carries an
    /// undecodable payload.
    pub fn decode(log: &RawLog) -> Result<Option<Self>, LedgerError> {
        fn payload<T: DeserializeOwned>(
            kind: EventKind,
            log: &RawLog,
        ) -> Result<T, LedgerError> {
            serde_json::from_value(log.data.clone()).map_err(|e| LedgerError::MalformedEvent {
                kind,
                detail: e.to_string(),
            })
        }

        let event = match log.name.as_str() {
            "EscrowCreated" => {
                Self::EscrowCreated(payload(EventKind::EscrowCreated, log)?)
            }
            "Released" => Self::Released(payload(EventKind::Released, log)?),
            "Disputed" => Self::Disputed(payload(EventKind::Disputed, log)?),
            "Arbitrated" => Self::Arbitrated(payload(EventKind::Arbitrated, log)?),
            "AutoReleased" => Self::AutoReleased(payload(EventKind::AutoReleased, log)?),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Encode back into a raw log entry. Used by the simulated ledger so
    /// the decode path in tests exercises the same machinery as a real
    /// receipt.
    pub fn encode(&self) -> RawLog {
        // Payload serialization of these derive types cannot fail.
        let data = match self {
            Self::EscrowCreated(p) => serde_json::to_value(p),
            Self::Released(p) => serde_json::to_value(p),
            Self::Disputed(p) => serde_json::to_value(p),
            Self::Arbitrated(p) => serde_json::to_value(p),
            Self::AutoReleased(p) => serde_json::to_value(p),
        }
        .unwrap_or(serde_json::Value::Null);
        RawLog {
            name: self.kind().name().to_string(),
            data,
        }
    }
}

// ─── Expected-Event Lookup ───────────────────────────────────────────

/// Typed event payloads that an operation can require from a receipt.
pub trait ExpectedEvent: DeserializeOwned {
    /// The kind this payload corresponds to.
    const KIND: EventKind;
}

impl ExpectedEvent for EscrowCreated {
    const KIND: EventKind = EventKind::EscrowCreated;
}
impl ExpectedEvent for Released {
    const KIND: EventKind = EventKind::Released;
}
impl ExpectedEvent for Disputed {
    const KIND: EventKind = EventKind::Disputed;
}
impl ExpectedEvent for Arbitrated {
    const KIND: EventKind = EventKind::Arbitrated;
}
impl ExpectedEvent for AutoReleased {
    const KIND: EventKind = EventKind::AutoReleased;
}

/// Locate and decode the event an operation must have emitted.
///
/// # Errors
///
/// [`LedgerError::EventMissing`] when no log carries the expected name —
/// the transaction confirmed but the ledger did not behave as assumed —
/// and [`LedgerError::MalformedEvent`] when the payload fails to decode.
pub fn expect_event<E: ExpectedEvent>(receipt: &TxReceipt) -> Result<E, LedgerError> {
    for log in &receipt.logs {
        if log.name == E::KIND.name() {
            return serde_json::from_value(log.data.clone()).map_err(|e| {
                LedgerError::MalformedEvent {
                    kind: E::KIND,
                    detail: e.to_string(),
                }
            });
        }
    }
    Err(LedgerError::EventMissing { expected: E::KIND })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created_event() -> LedgerEvent {
        LedgerEvent::EscrowCreated(EscrowCreated {
            id: EscrowId(7),
            buyer: Address::parse("0x1111111111111111111111111111111111111111").unwrap(),
            seller: Address::parse("0x2222222222222222222222222222222222222222").unwrap(),
            arbiter: Address::parse("0x3333333333333333333333333333333333333333").unwrap(),
            amount: TokenAmount::from_tokens(500),
            timeout_secs: 600,
        })
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let event = created_event();
        let log = event.encode();
        assert_eq!(log.name, "EscrowCreated");
        let decoded = LedgerEvent::decode(&log).unwrap().unwrap();
        assert_eq!(decoded, event);
    }

    #[test]
    fn test_foreign_log_is_skipped() {
        let log = RawLog {
            name: "Transfer".to_string(),
            data: serde_json::json!({"from": "0x0", "to": "0x1"}),
        };
        assert_eq!(LedgerEvent::decode(&log).unwrap(), None);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        let log = RawLog {
            name: "Released".to_string(),
            data: serde_json::json!({"unexpected": true}),
        };
        let err = LedgerEvent::decode(&log).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MalformedEvent {
                kind: EventKind::Released,
                ..
            }
        ));
    }

    #[test]
    fn test_expect_event_finds_among_foreign_logs() {
        let receipt = TxReceipt {
            tx: "tx-1".to_string(),
            logs: vec![
                RawLog {
                    name: "Transfer".to_string(),
                    data: serde_json::Value::Null,
                },
                created_event().encode(),
            ],
        };
        let ev: EscrowCreated = expect_event(&receipt).unwrap();
        assert_eq!(ev.id, EscrowId(7));
        assert_eq!(ev.timeout_secs, 600);
    }

    #[test]
    fn test_expect_event_absent_is_distinct_failure() {
        let receipt = TxReceipt {
            tx: "tx-2".to_string(),
            logs: vec![],
        };
        let err = expect_event::<Released>(&receipt).unwrap_err();
        assert_eq!(
            err,
            LedgerError::EventMissing {
                expected: EventKind::Released
            }
        );
    }
}
