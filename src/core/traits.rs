//! Core traits for record storage
//!
//! This module defines the trait abstraction that lets the query engine and
//! the seeding code run against either the single-owner store or the
//! thread-safe one.

use crate::types::{
    BulkDeleteResponse, Currency, DeleteResponse, LedgerError, NewTransaction, Transaction,
    TransactionId,
};

/// Trait for storing transactions and the currency catalog
///
/// Implementations can be single-owner (using a BTreeMap) or shared across
/// threads (using DashMap).
pub trait RecordStore {
    /// Store a new transaction under the next free id
    fn add_transaction(&mut self, payload: NewTransaction) -> Transaction;

    /// Overwrite every field of an existing transaction except its id
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` if no transaction has this id.
    fn update_transaction(
        &mut self,
        id: TransactionId,
        payload: NewTransaction,
    ) -> Result<Transaction, LedgerError>;

    /// Remove a transaction; `ok` reports whether it existed
    fn delete_transaction(&mut self, id: TransactionId) -> DeleteResponse;

    /// Delete each id independently and count the ones that existed
    ///
    /// There is no atomicity across the batch.
    fn delete_transactions_bulk(&mut self, ids: &[TransactionId]) -> BulkDeleteResponse {
        let ok_count = ids
            .iter()
            .filter(|&&id| self.delete_transaction(id).ok)
            .count();
        BulkDeleteResponse { ok_count }
    }

    /// The currency catalog in registration order
    fn currencies(&self) -> Vec<Currency>;

    /// Copy of every stored transaction in insertion (id) order
    fn snapshot(&self) -> Vec<Transaction>;

    /// Number of stored transactions
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
