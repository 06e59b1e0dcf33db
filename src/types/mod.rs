//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `currency`: the static currency catalog
//! - `transaction`: stored transactions and their client-supplied payload
//! - `query`: paging/ordering/filtering parameters and response shapes
//! - `request`: operations on the ledger and their results
//! - `error`: Error types for the ledger

pub mod currency;
pub mod error;
pub mod query;
pub mod request;
pub mod transaction;

pub use currency::{Currency, CURRENCY_CATALOG};
pub use error::LedgerError;
pub use query::{
    BulkDeleteResponse, DeleteResponse, PageInfo, QueryParams, SortKey, SortOrder,
    TransactionConnection, TransactionEdge,
};
pub use request::{Request, Response};
pub use transaction::{NewTransaction, Transaction, TransactionId};
