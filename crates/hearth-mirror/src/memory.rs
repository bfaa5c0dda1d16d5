//! # In-Memory Backend
//!
//! A shared-handle in-memory implementation of [`MirrorStore`], used by
//! the test suites and the sandbox CLI (which persists snapshots of
//! [`StoreData`] between invocations).

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use hearth_core::{Address, EscrowId, EscrowStatus, ListingId, ListingStatus};

use crate::records::{EscrowRecord, ListingRecord, ParticipantEscrow};
use crate::store::{MirrorStore, StoreError};

/// The replica's raw tables, serializable for persistence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreData {
    escrows: BTreeMap<u64, EscrowRecord>,
    listings: BTreeMap<u64, ListingRecord>,
}

/// Shared-handle in-memory mirror. Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<StoreData>>,
}

impl MemoryStore {
    /// An empty mirror.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rehydrate from a persisted snapshot.
    pub fn from_data(data: StoreData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// Snapshot the tables for persistence.
    pub fn snapshot(&self) -> Result<StoreData, StoreError> {
        Ok(self
            .data
            .read()
            .map_err(|_| StoreError::Backend("mirror state poisoned".to_string()))?
            .clone())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreData>, StoreError> {
        self.data
            .read()
            .map_err(|_| StoreError::Backend("mirror state poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreData>, StoreError> {
        self.data
            .write()
            .map_err(|_| StoreError::Backend("mirror state poisoned".to_string()))
    }
}

impl MirrorStore for MemoryStore {
    async fn insert_escrow(&self, record: EscrowRecord) -> Result<(), StoreError> {
        record.validate()?;
        let mut data = self.write()?;
        let id = record.id;
        if data.escrows.contains_key(&id.as_u64()) {
            return Err(StoreError::DuplicateEscrow(id));
        }
        data.escrows.insert(id.as_u64(), record);
        tracing::debug!(%id, "mirrored new escrow");
        Ok(())
    }

    async fn update_escrow_status(
        &self,
        id: EscrowId,
        status: EscrowStatus,
        dispute_reason: Option<String>,
    ) -> Result<(), StoreError> {
        let mut data = self.write()?;
        let record = data
            .escrows
            .get_mut(&id.as_u64())
            .ok_or(StoreError::UnknownEscrow(id))?;
        record.status = status;
        if let Some(reason) = dispute_reason {
            record.dispute_reason = Some(reason);
        }
        tracing::debug!(%id, %status, "mirrored escrow status");
        Ok(())
    }

    async fn update_listing_status(
        &self,
        listing_id: ListingId,
        status: ListingStatus,
    ) -> Result<(), StoreError> {
        let mut data = self.write()?;
        data.listings
            .entry(listing_id.as_u64())
            .and_modify(|l| l.status = status)
            .or_insert(ListingRecord {
                id: listing_id,
                status,
            });
        tracing::debug!(id = %listing_id, %status, "mirrored listing status");
        Ok(())
    }

    async fn escrows_for_participant(
        &self,
        address: &Address,
    ) -> Result<Vec<ParticipantEscrow>, StoreError> {
        let data = self.read()?;
        Ok(data
            .escrows
            .values()
            .filter_map(|record| {
                record.role_of(address).map(|role| ParticipantEscrow {
                    record: record.clone(),
                    role,
                })
            })
            .collect())
    }

    async fn get_escrow(&self, id: EscrowId) -> Result<Option<EscrowRecord>, StoreError> {
        Ok(self.read()?.escrows.get(&id.as_u64()).cloned())
    }

    async fn get_listing(&self, id: ListingId) -> Result<Option<ListingRecord>, StoreError> {
        Ok(self.read()?.listings.get(&id.as_u64()).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::{Timestamp, TokenAmount};

    fn addr(fill: char) -> Address {
        Address::parse(&format!("0x{}", fill.to_string().repeat(40))).unwrap()
    }

    fn record(id: u64, buyer: char, seller: char, arbiter: char) -> EscrowRecord {
        EscrowRecord {
            id: EscrowId(id),
            listing_id: ListingId(id * 10),
            listing_title: format!("Listing {id}"),
            buyer_address: addr(buyer),
            seller_address: addr(seller),
            arbiter_address: addr(arbiter),
            arbiter_name: "Arbiter".to_string(),
            amount: TokenAmount::from_tokens(500),
            status: EscrowStatus::Pending,
            terms: "terms".to_string(),
            timeout_secs: 600,
            created_at: Timestamp::parse("2026-08-27T12:00:00Z").unwrap(),
            dispute_reason: None,
        }
    }

    #[tokio::test]
    async fn test_insert_then_read_back() {
        let store = MemoryStore::new();
        store.insert_escrow(record(1, '1', '2', '3')).await.unwrap();
        let fetched = store.get_escrow(EscrowId(1)).await.unwrap().unwrap();
        assert_eq!(fetched.status, EscrowStatus::Pending);
        assert_eq!(fetched.amount, TokenAmount::from_tokens(500));
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let store = MemoryStore::new();
        store.insert_escrow(record(1, '1', '2', '3')).await.unwrap();
        assert_eq!(
            store.insert_escrow(record(1, '1', '2', '3')).await,
            Err(StoreError::DuplicateEscrow(EscrowId(1)))
        );
    }

    #[tokio::test]
    async fn test_invalid_record_rejected_at_boundary() {
        let store = MemoryStore::new();
        let mut bad = record(1, '1', '2', '3');
        bad.amount = TokenAmount::ZERO;
        assert!(matches!(
            store.insert_escrow(bad).await,
            Err(StoreError::InvalidRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_status_update_preserves_reason_unless_given() {
        let store = MemoryStore::new();
        store.insert_escrow(record(1, '1', '2', '3')).await.unwrap();

        store
            .update_escrow_status(
                EscrowId(1),
                EscrowStatus::Disputed,
                Some("bad wifi".to_string()),
            )
            .await
            .unwrap();
        store
            .update_escrow_status(EscrowId(1), EscrowStatus::Refunded, None)
            .await
            .unwrap();

        let fetched = store.get_escrow(EscrowId(1)).await.unwrap().unwrap();
        assert_eq!(fetched.status, EscrowStatus::Refunded);
        assert_eq!(fetched.dispute_reason.as_deref(), Some("bad wifi"));
    }

    #[tokio::test]
    async fn test_update_unknown_escrow() {
        let store = MemoryStore::new();
        assert_eq!(
            store
                .update_escrow_status(EscrowId(9), EscrowStatus::Completed, None)
                .await,
            Err(StoreError::UnknownEscrow(EscrowId(9)))
        );
    }

    #[tokio::test]
    async fn test_listing_upsert() {
        let store = MemoryStore::new();
        store
            .update_listing_status(ListingId(10), ListingStatus::Escrowed)
            .await
            .unwrap();
        store
            .update_listing_status(ListingId(10), ListingStatus::Rented)
            .await
            .unwrap();
        let listing = store.get_listing(ListingId(10)).await.unwrap().unwrap();
        assert_eq!(listing.status, ListingStatus::Rented);
    }

    #[tokio::test]
    async fn test_participant_query_scopes_roles() {
        let store = MemoryStore::new();
        // 'a' is buyer on escrow 1, seller on escrow 2, absent from 3.
        store.insert_escrow(record(1, 'a', '2', '3')).await.unwrap();
        store.insert_escrow(record(2, '1', 'a', '3')).await.unwrap();
        store.insert_escrow(record(3, '1', '2', '3')).await.unwrap();

        let mine = store.escrows_for_participant(&addr('a')).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].record.id, EscrowId(1));
        assert_eq!(mine[0].role, hearth_core::Role::Buyer);
        assert_eq!(mine[1].record.id, EscrowId(2));
        assert_eq!(mine[1].role, hearth_core::Role::Seller);
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip() {
        let store = MemoryStore::new();
        store.insert_escrow(record(1, '1', '2', '3')).await.unwrap();
        let json = serde_json::to_string(&store.snapshot().unwrap()).unwrap();
        let restored = MemoryStore::from_data(serde_json::from_str(&json).unwrap());
        assert!(restored.get_escrow(EscrowId(1)).await.unwrap().is_some());
    }
}
