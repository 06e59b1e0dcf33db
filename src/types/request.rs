//! Operation requests and their results
//!
//! `Request` is the decoded form of one call on the ledger's operation
//! surface; `Response` is whatever that call produced. Wire encoding lives
//! in `io::request_format`.

use super::currency::Currency;
use super::query::{BulkDeleteResponse, DeleteResponse, QueryParams, TransactionConnection};
use super::transaction::{NewTransaction, Transaction, TransactionId};
use serde::Serialize;

/// One operation on the ledger
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Page through transactions
    TransactionConnection(QueryParams),

    /// List the currency catalog
    Currencies,

    /// Create a transaction; the store assigns its id
    AddTransaction(NewTransaction),

    /// Overwrite an existing transaction
    UpdateTransaction {
        id: TransactionId,
        payload: NewTransaction,
    },

    /// Remove one transaction
    DeleteTransaction { id: TransactionId },

    /// Remove several transactions independently
    DeleteTransactionsBulk { ids: Vec<TransactionId> },
}

impl Request {
    /// Operation name as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Request::TransactionConnection(_) => "transactionConnection",
            Request::Currencies => "currencies",
            Request::AddTransaction(_) => "addTransaction",
            Request::UpdateTransaction { .. } => "updateTransaction",
            Request::DeleteTransaction { .. } => "deleteTransaction",
            Request::DeleteTransactionsBulk { .. } => "deleteTransactionsBulk",
        }
    }

    /// Whether the operation changes the store
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Request::TransactionConnection(_) | Request::Currencies
        )
    }
}

/// Result of a successful operation
///
/// Serialized without a wrapper, so each variant appears on the wire as the
/// bare output shape of its operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    TransactionConnection(TransactionConnection),
    Currencies(Vec<Currency>),
    Transaction(Transaction),
    Delete(DeleteResponse),
    BulkDelete(BulkDeleteResponse),
}
