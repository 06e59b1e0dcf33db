//! Request dispatch over a single-owner store
//!
//! This module provides the LedgerEngine that routes each decoded `Request`
//! to the record store or the query engine and returns the operation's
//! result. Requests run one at a time, each to completion.

use crate::core::query_engine::query_transactions;
use crate::core::seed::{seed_store, SeedConfig};
use crate::core::traits::RecordStore;
use crate::core::transaction_store::TransactionStore;
use crate::types::{LedgerError, Request, Response, Transaction};

/// Request processing engine
///
/// Owns its store; callers hand it requests and read back responses.
pub struct LedgerEngine<S: RecordStore = TransactionStore> {
    store: S,
}

impl LedgerEngine<TransactionStore> {
    /// Create an engine over a freshly seeded store
    pub fn seeded(config: &SeedConfig) -> Self {
        let mut store = TransactionStore::new();
        seed_store(&mut store, config);
        Self::with_store(store)
    }
}

impl<S: RecordStore> LedgerEngine<S> {
    /// Create an engine over an existing store
    pub fn with_store(store: S) -> Self {
        LedgerEngine { store }
    }

    /// Process a single request
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` when an update references an absent
    /// id. Every other operation is total.
    pub fn process(&mut self, request: Request) -> Result<Response, LedgerError> {
        dispatch(&mut self.store, request)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current store contents in id order
    pub fn transactions(&self) -> Vec<Transaction> {
        self.store.snapshot()
    }
}

/// Route one request to the store or the query engine
fn dispatch<S>(store: &mut S, request: Request) -> Result<Response, LedgerError>
where
    S: RecordStore + ?Sized,
{
    tracing::debug!(
        op = request.name(),
        mutation = request.is_mutation(),
        "dispatching request"
    );

    match request {
        Request::TransactionConnection(params) => Ok(Response::TransactionConnection(
            query_transactions(&*store, &params),
        )),
        Request::Currencies => Ok(Response::Currencies(store.currencies())),
        Request::AddTransaction(payload) => {
            let added = store.add_transaction(payload);
            tracing::debug!(id = added.id, "transaction added");
            Ok(Response::Transaction(added))
        }
        Request::UpdateTransaction { id, payload } => match store.update_transaction(id, payload) {
            Ok(updated) => {
                tracing::debug!(id, "transaction updated");
                Ok(Response::Transaction(updated))
            }
            Err(e) => {
                tracing::debug!(id, error = %e, "transaction update rejected");
                Err(e)
            }
        },
        Request::DeleteTransaction { id } => {
            let response = store.delete_transaction(id);
            tracing::debug!(id, ok = response.ok, "transaction delete");
            Ok(Response::Delete(response))
        }
        Request::DeleteTransactionsBulk { ids } => {
            let response = store.delete_transactions_bulk(&ids);
            tracing::debug!(
                requested = ids.len(),
                ok_count = response.ok_count,
                "bulk transaction delete"
            );
            Ok(Response::BulkDelete(response))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        BulkDeleteResponse, DeleteResponse, NewTransaction, QueryParams, SortKey, SortOrder,
    };
    use rust_decimal::Decimal;

    fn engine() -> LedgerEngine {
        LedgerEngine::seeded(&SeedConfig::fixed_only())
    }

    #[test]
    fn test_query_through_engine() {
        let mut engine = engine();
        let params = QueryParams::new(0, 10)
            .order(SortOrder::Asc)
            .order_by(SortKey::Amount);

        let response = engine.process(Request::TransactionConnection(params)).unwrap();

        match response {
            Response::TransactionConnection(page) => {
                let ids: Vec<u64> = page.items().map(|tx| tx.id).collect();
                assert_eq!(ids, vec![2, 1, 0]);
                assert_eq!(page.page_info.total_count, 3);
            }
            other => panic!("Expected a connection, got {:?}", other),
        }
    }

    #[test]
    fn test_currencies_through_engine() {
        let mut engine = engine();

        let response = engine.process(Request::Currencies).unwrap();

        match response {
            Response::Currencies(currencies) => assert_eq!(currencies.len(), 3),
            other => panic!("Expected currencies, got {:?}", other),
        }
    }

    #[test]
    fn test_add_then_update() {
        let mut engine = engine();

        let added = engine
            .process(Request::AddTransaction(NewTransaction::new(
                "u",
                Decimal::new(3, 0),
                "USD",
            )))
            .unwrap();
        assert!(matches!(added, Response::Transaction(ref tx) if tx.id == 3));

        let updated = engine
            .process(Request::UpdateTransaction {
                id: 3,
                payload: NewTransaction::new("u2", Decimal::new(4, 0), "EUR"),
            })
            .unwrap();
        match updated {
            Response::Transaction(tx) => {
                assert_eq!(tx.id, 3);
                assert_eq!(tx.uuid, "u2");
                assert_eq!(tx.currency, "EUR");
            }
            other => panic!("Expected a transaction, got {:?}", other),
        }
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let mut engine = engine();

        let result = engine.process(Request::UpdateTransaction {
            id: 42,
            payload: NewTransaction::new("u", Decimal::ONE, "BTC"),
        });

        assert_eq!(result, Err(LedgerError::not_found(42, "update")));
    }

    #[test]
    fn test_delete_twice() {
        let mut engine = engine();

        let first = engine.process(Request::DeleteTransaction { id: 1 }).unwrap();
        let second = engine.process(Request::DeleteTransaction { id: 1 }).unwrap();

        assert_eq!(first, Response::Delete(DeleteResponse { ok: true }));
        assert_eq!(second, Response::Delete(DeleteResponse { ok: false }));
    }

    #[test]
    fn test_bulk_delete_leaves_remaining() {
        let mut engine = engine();

        let response = engine
            .process(Request::DeleteTransactionsBulk {
                ids: vec![0, 1, 99],
            })
            .unwrap();

        assert_eq!(response, Response::BulkDelete(BulkDeleteResponse { ok_count: 2 }));
        let remaining: Vec<u64> = engine.transactions().iter().map(|tx| tx.id).collect();
        assert_eq!(remaining, vec![2]);
    }
}
