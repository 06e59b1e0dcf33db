//! Single-owner record store
//!
//! This module provides the TransactionStore component that holds the
//! currency catalog and the transaction set for the lifetime of the process.
//! It assigns transaction ids and performs the create/update/delete
//! mutations.
//!
//! # Id Allocation
//!
//! Ids come from a counter that only ever moves forward. Deleting a
//! transaction frees its map slot but never its id, so a later `add` can
//! not resurrect an old identifier.
//!
//! # Ordering
//!
//! Transactions live in a `BTreeMap` keyed by id. Because ids are handed
//! out monotonically, key order equals insertion order, which is the
//! tie-break order the query engine relies on.

use crate::core::traits::RecordStore;
use crate::types::{
    Currency, DeleteResponse, LedgerError, NewTransaction, Transaction, TransactionId,
};
use std::collections::BTreeMap;

/// Record store owned by a single caller
///
/// Every mutation takes `&mut self`, so one operation always runs to
/// completion before the next begins.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    /// Map of transaction id to stored transaction
    transactions: BTreeMap<TransactionId, Transaction>,

    /// Currency catalog, in registration order
    currencies: Vec<Currency>,

    /// Next id to hand out
    next_id: TransactionId,
}

impl TransactionStore {
    /// Create a store with the fixed currency catalog and no transactions
    pub fn new() -> Self {
        TransactionStore {
            transactions: BTreeMap::new(),
            currencies: Currency::catalog(),
            next_id: 0,
        }
    }

    /// Get an immutable reference to a stored transaction
    ///
    /// # Returns
    ///
    /// * `Some(&Transaction)` - If the transaction exists
    /// * `None` - If the id is not found
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(&id)
    }

    /// Id the next `add_transaction` call will assign
    pub fn next_id(&self) -> TransactionId {
        self.next_id
    }
}

impl Default for TransactionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for TransactionStore {
    fn add_transaction(&mut self, payload: NewTransaction) -> Transaction {
        let id = self.next_id;
        self.next_id += 1;

        let transaction = payload.with_id(id);
        self.transactions.insert(id, transaction.clone());
        transaction
    }

    fn update_transaction(
        &mut self,
        id: TransactionId,
        payload: NewTransaction,
    ) -> Result<Transaction, LedgerError> {
        let stored = self
            .transactions
            .get_mut(&id)
            .ok_or_else(|| LedgerError::not_found(id, "update"))?;

        *stored = payload.with_id(id);
        Ok(stored.clone())
    }

    fn delete_transaction(&mut self, id: TransactionId) -> DeleteResponse {
        DeleteResponse {
            ok: self.transactions.remove(&id).is_some(),
        }
    }

    fn currencies(&self) -> Vec<Currency> {
        self.currencies.clone()
    }

    fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.values().cloned().collect()
    }

    fn len(&self) -> usize {
        self.transactions.len()
    }
}
