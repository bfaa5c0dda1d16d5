//! # Mirrored Records
//!
//! The typed rows of the off-chain replica. Field-level shape validation
//! (address format, amount format, status names) is carried by the core
//! newtypes and enforced during deserialization; `validate()` adds the
//! value-level rules a well-formed row must satisfy.

use serde::{Deserialize, Serialize};

use hearth_core::{
    Address, EscrowId, EscrowStatus, ListingId, ListingStatus, Role, Timestamp, TokenAmount,
};

use crate::store::StoreError;

/// One mirrored escrow row.
///
/// Every field except `status` and `dispute_reason` is write-once: fixed
/// when the coordinator inserts the row after a confirmed `EscrowCreated`
/// event, never mutated by any later transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscrowRecord {
    /// Ledger-assigned escrow id.
    pub id: EscrowId,
    /// The listing this escrow rents.
    pub listing_id: ListingId,
    /// Denormalized listing title for display.
    pub listing_title: String,
    /// The tenant who funded the escrow.
    pub buyer_address: Address,
    /// The landlord.
    pub seller_address: Address,
    /// The neutral arbiter.
    pub arbiter_address: Address,
    /// Display label for the arbiter.
    pub arbiter_name: String,
    /// The escrowed amount.
    pub amount: TokenAmount,
    /// Current mirrored status.
    pub status: EscrowStatus,
    /// Free-text rental terms the arbiter adjudicates against.
    pub terms: String,
    /// Seconds after `created_at` at which auto-release becomes eligible.
    pub timeout_secs: u64,
    /// When the escrow was created, stamped from the writer's clock at
    /// insert time. The created event carries no timestamp, so this may
    /// trail the chain's own clock; it feeds only the advisory
    /// offered-action gate, and the ledger re-checks the deadline
    /// authoritatively on submission.
    pub created_at: Timestamp,
    /// Present once a dispute has been raised. Retained after resolution
    /// as display history; never reused by a later transition.
    #[serde(default)]
    pub dispute_reason: Option<String>,
}

impl EscrowRecord {
    /// Value-level validation applied at the store boundary.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.amount.is_zero() {
            return Err(StoreError::InvalidRecord(format!(
                "{}: amount must be positive",
                self.id
            )));
        }
        if self.status == EscrowStatus::Pending && self.dispute_reason.is_some() {
            return Err(StoreError::InvalidRecord(format!(
                "{}: pending escrow cannot carry a dispute reason",
                self.id
            )));
        }
        Ok(())
    }

    /// The role `address` holds on this escrow, if any.
    ///
    /// An account coincidentally holding several roles on one escrow is
    /// surfaced under the first match, with buyer > seller > arbiter
    /// precedence.
    pub fn role_of(&self, address: &Address) -> Option<Role> {
        if address == &self.buyer_address {
            Some(Role::Buyer)
        } else if address == &self.seller_address {
            Some(Role::Seller)
        } else if address == &self.arbiter_address {
            Some(Role::Arbiter)
        } else {
            None
        }
    }
}

/// One mirrored listing row. Only the rental status is mirrored here; the
/// listing's own metadata lives in the listings store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Listing identifier.
    pub id: ListingId,
    /// Current rental status.
    pub status: ListingStatus,
}

/// An escrow surfaced for a participant query, with the role scoped to
/// the queried address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantEscrow {
    /// The mirrored escrow.
    pub record: EscrowRecord,
    /// The queried address's role on it.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(fill: char) -> Address {
        Address::parse(&format!("0x{}", fill.to_string().repeat(40))).unwrap()
    }

    fn record() -> EscrowRecord {
        EscrowRecord {
            id: EscrowId(1),
            listing_id: ListingId(10),
            listing_title: "Sunny studio near campus".to_string(),
            buyer_address: addr('1'),
            seller_address: addr('2'),
            arbiter_address: addr('3'),
            arbiter_name: "Campus Housing Board".to_string(),
            amount: TokenAmount::from_tokens(500),
            status: EscrowStatus::Pending,
            terms: "Move-in by the 1st, deposit covers damages.".to_string(),
            timeout_secs: 600,
            created_at: Timestamp::parse("2026-08-27T12:00:00Z").unwrap(),
            dispute_reason: None,
        }
    }

    #[test]
    fn test_valid_record_passes() {
        assert!(record().validate().is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let mut r = record();
        r.amount = TokenAmount::ZERO;
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_pending_with_reason_rejected() {
        let mut r = record();
        r.dispute_reason = Some("bad wifi".to_string());
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_role_resolution() {
        let r = record();
        assert_eq!(r.role_of(&addr('1')), Some(Role::Buyer));
        assert_eq!(r.role_of(&addr('2')), Some(Role::Seller));
        assert_eq!(r.role_of(&addr('3')), Some(Role::Arbiter));
        assert_eq!(r.role_of(&addr('4')), None);
    }

    #[test]
    fn test_role_precedence_when_addresses_coincide() {
        let mut r = record();
        r.seller_address = r.buyer_address.clone();
        assert_eq!(r.role_of(&r.buyer_address.clone()), Some(Role::Buyer));
    }

    #[test]
    fn test_malformed_row_fails_deserialization() {
        // Address validation runs inside serde, so a bad row is rejected
        // at the boundary instead of propagating untyped.
        let mut value = serde_json::to_value(record()).unwrap();
        value["buyer_address"] = serde_json::json!("not-an-address");
        assert!(serde_json::from_value::<EscrowRecord>(value).is_err());
    }
}
