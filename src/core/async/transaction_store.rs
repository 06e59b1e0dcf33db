//! Thread-safe record store for async request processing
//!
//! This module provides the `AsyncTransactionStore` struct, which holds the
//! transaction set in concurrent data structures so independent requests can
//! run on different worker threads at the same time.
//!
//! # Design
//!
//! Transactions live in a `DashMap` (a concurrent HashMap with sharded
//! locking) and ids come from an `AtomicU64` counter. `fetch_add` hands every
//! caller a distinct id, so ids stay unique and monotonic no matter how many
//! adds race each other.
//!
//! # Ordering
//!
//! DashMap iteration order is arbitrary, so `snapshot` sorts by id before
//! returning. Since ids are allocated monotonically, id order is insertion
//! order.
//!
//! # Thread Safety
//!
//! All inherent methods take `&self` and are safe to call concurrently. A
//! snapshot taken while mutations are in flight reflects some interleaving of
//! them; there is no isolation beyond per-entry locking.

use crate::core::traits::RecordStore;
use crate::types::{
    BulkDeleteResponse, Currency, DeleteResponse, LedgerError, NewTransaction, Transaction,
    TransactionId,
};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe record store
///
/// `AsyncTransactionStore` is meant to be wrapped in an `Arc` and shared by
/// every task serving requests.
#[derive(Debug)]
pub struct AsyncTransactionStore {
    /// Concurrent map of transaction id to stored transaction
    transactions: DashMap<TransactionId, Transaction>,

    /// Currency catalog, immutable after construction
    currencies: Vec<Currency>,

    /// Next id to hand out
    next_id: AtomicU64,
}

impl AsyncTransactionStore {
    /// Create a store with the fixed currency catalog and no transactions
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
            currencies: Currency::catalog(),
            next_id: AtomicU64::new(0),
        }
    }
}

impl Default for AsyncTransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AsyncTransactionStore {
    /// Store a new transaction under the next free id (thread-safe)
    pub fn add(&self, payload: NewTransaction) -> Transaction {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let transaction = payload.with_id(id);
        self.transactions.insert(id, transaction.clone());
        transaction
    }

    /// Overwrite an existing transaction (thread-safe)
    ///
    /// The entry stays locked while it is rewritten, so a concurrent reader
    /// sees either the old or the new record, never a mix.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no transaction has this id.
    pub fn update(
        &self,
        id: TransactionId,
        payload: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        match self.transactions.get_mut(&id) {
            Some(mut entry) => {
                *entry.value_mut() = payload.with_id(id);
                Ok(entry.value().clone())
            }
            None => Err(LedgerError::not_found(id, "update")),
        }
    }

    /// Remove a transaction (thread-safe)
    pub fn delete(&self, id: TransactionId) -> DeleteResponse {
        DeleteResponse {
            ok: self.transactions.remove(&id).is_some(),
        }
    }

    /// Remove several transactions, each independently (thread-safe)
    pub fn delete_bulk(&self, ids: &[TransactionId]) -> BulkDeleteResponse {
        let ok_count = ids.iter().filter(|&&id| self.delete(id).ok).count();
        BulkDeleteResponse { ok_count }
    }

    /// Get a copy of a stored transaction
    pub fn get(&self, id: TransactionId) -> Option<Transaction> {
        self.transactions.get(&id).map(|entry| entry.value().clone())
    }

    /// Copy of every stored transaction, sorted by id
    pub fn transactions(&self) -> Vec<Transaction> {
        let mut snapshot: Vec<Transaction> = self
            .transactions
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        snapshot.sort_unstable_by_key(|tx| tx.id);
        snapshot
    }

    pub fn currency_catalog(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn count(&self) -> usize {
        self.transactions.len()
    }
}

impl RecordStore for AsyncTransactionStore {
    fn add_transaction(&mut self, payload: NewTransaction) -> Transaction {
        self.add(payload)
    }

    fn update_transaction(
        &mut self,
        id: TransactionId,
        payload: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        self.update(id, payload)
    }

    fn delete_transaction(&mut self, id: TransactionId) -> DeleteResponse {
        self.delete(id)
    }

    fn delete_transactions_bulk(&mut self, ids: &[TransactionId]) -> BulkDeleteResponse {
        self.delete_bulk(ids)
    }

    fn currencies(&self) -> Vec<Currency> {
        self.currencies.clone()
    }

    fn snapshot(&self) -> Vec<Transaction> {
        self.transactions()
    }

    fn len(&self) -> usize {
        self.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::sync::Arc;
    use std::thread;

    fn payload(uuid: &str, currency: &str) -> NewTransaction {
        NewTransaction::new(uuid, Decimal::ONE, currency)
    }

    #[test]
    fn test_add_and_get() {
        let store = AsyncTransactionStore::new();

        let added = store.add(payload("a", "BTC"));

        assert_eq!(added.id, 0);
        assert_eq!(store.get(0), Some(added));
    }

    #[test]
    fn test_get_nonexistent_transaction() {
        let store = AsyncTransactionStore::new();
        assert!(store.get(999).is_none());
    }

    #[test]
    fn test_update_nonexistent_transaction() {
        let store = AsyncTransactionStore::new();

        let result = store.update(999, payload("z", "BTC"));

        match result {
            Err(LedgerError::NotFound { id, operation }) => {
                assert_eq!(id, 999);
                assert_eq!(operation, "update");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_update_keeps_id() {
        let store = AsyncTransactionStore::new();
        store.add(payload("a", "BTC"));

        let updated = store.update(0, payload("b", "EUR")).unwrap();

        assert_eq!(updated.id, 0);
        assert_eq!(store.get(0).unwrap().currency, "EUR");
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = AsyncTransactionStore::new();
        store.add(payload("a", "BTC"));

        assert!(store.delete(0).ok);
        assert!(!store.delete(0).ok);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let store = AsyncTransactionStore::new();
        store.add(payload("a", "BTC"));
        store.delete(0);

        assert_eq!(store.add(payload("b", "BTC")).id, 1);
    }

    #[test]
    fn test_snapshot_is_sorted_by_id() {
        let store = AsyncTransactionStore::new();
        for i in 0..50 {
            store.add(payload(&format!("u{}", i), "USD"));
        }

        let ids: Vec<TransactionId> = store.transactions().iter().map(|tx| tx.id).collect();
        assert_eq!(ids, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_bulk_delete_counts_existing_ids() {
        let store = AsyncTransactionStore::new();
        for i in 0..3 {
            store.add(payload(&format!("u{}", i), "BTC"));
        }

        assert_eq!(store.delete_bulk(&[0, 1, 99]).ok_count, 2);
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_concurrent_adds_get_distinct_ids() {
        let store = Arc::new(AsyncTransactionStore::new());

        let mut handles = vec![];
        for t in 0..8 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                for i in 0..100 {
                    store_clone.add(payload(&format!("t{}-{}", t, i), "BTC"));
                }
            });
            handles.push(handle);
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let ids: Vec<TransactionId> = store.transactions().iter().map(|tx| tx.id).collect();
        assert_eq!(ids, (0..800).collect::<Vec<_>>());
    }

    #[test]
    fn test_concurrent_deletes_count_each_id_once() {
        let store = Arc::new(AsyncTransactionStore::new());
        for i in 0..100 {
            store.add(payload(&format!("u{}", i), "BTC"));
        }

        let mut handles = vec![];
        for _ in 0..4 {
            let store_clone = Arc::clone(&store);
            let handle = thread::spawn(move || {
                let ids: Vec<TransactionId> = (0..100).collect();
                store_clone.delete_bulk(&ids).ok_count
            });
            handles.push(handle);
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 100);
        assert_eq!(store.count(), 0);
    }
}
