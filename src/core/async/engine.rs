//! Request dispatch over the shared store
//!
//! This module provides the `AsyncLedgerEngine` struct, which routes decoded
//! requests to an `Arc`-shared `AsyncTransactionStore`. Every request is an
//! independent unit: the engine imposes no ordering between requests that
//! run concurrently.
//!
//! # Architecture
//!
//! ```text
//! AsyncLedgerEngine
//!     └── Arc<AsyncTransactionStore> (thread-safe record store)
//! ```

use std::sync::Arc;

use crate::core::query_engine::query_transactions;
use crate::types::{LedgerError, Request, Response};

use super::AsyncTransactionStore;

/// Request processing engine for concurrent use
///
/// Cloning the engine clones the `Arc`, so every clone serves the same store.
#[derive(Debug, Clone)]
pub struct AsyncLedgerEngine {
    /// Shared record store
    store: Arc<AsyncTransactionStore>,
}

impl AsyncLedgerEngine {
    /// Create a new AsyncLedgerEngine
    ///
    /// # Arguments
    ///
    /// * `store` - Arc-wrapped AsyncTransactionStore, usually already seeded
    pub fn new(store: Arc<AsyncTransactionStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<AsyncTransactionStore> {
        &self.store
    }

    /// Process a single request (thread-safe)
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::NotFound` when an update references an absent
    /// id.
    pub fn process_request(&self, request: Request) -> Result<Response, LedgerError> {
        tracing::debug!(
            op = request.name(),
            mutation = request.is_mutation(),
            "dispatching request"
        );

        match request {
            Request::TransactionConnection(params) => Ok(Response::TransactionConnection(
                query_transactions(self.store.as_ref(), &params),
            )),
            Request::Currencies => Ok(Response::Currencies(
                self.store.currency_catalog().to_vec(),
            )),
            Request::AddTransaction(payload) => {
                let added = self.store.add(payload);
                tracing::debug!(id = added.id, "transaction added");
                Ok(Response::Transaction(added))
            }
            Request::UpdateTransaction { id, payload } => {
                let updated = self.store.update(id, payload).inspect_err(|e| {
                    tracing::debug!(id, error = %e, "transaction update rejected");
                })?;
                tracing::debug!(id, "transaction updated");
                Ok(Response::Transaction(updated))
            }
            Request::DeleteTransaction { id } => {
                let response = self.store.delete(id);
                tracing::debug!(id, ok = response.ok, "transaction delete");
                Ok(Response::Delete(response))
            }
            Request::DeleteTransactionsBulk { ids } => {
                let response = self.store.delete_bulk(&ids);
                tracing::debug!(
                    requested = ids.len(),
                    ok_count = response.ok_count,
                    "bulk transaction delete"
                );
                Ok(Response::BulkDelete(response))
            }
        }
    }
}
