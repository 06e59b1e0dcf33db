//! Transaction Ledger Library
//! # Overview
//!
//! This library provides an in-memory transaction ledger with a query engine
//! for filtered, stably sorted, paged listings, served over JSON lines with
//! either a sync or an async strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, QueryParams, Request, etc.)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - Ledger logic:
//!   - [`core::transaction_store`] - Record store with monotonic ids
//!   - [`core::query_engine`] - Filter, stable sort, and paging
//!   - [`core::seed`] - Startup population of the store
//!   - [`core::engine`] - Request dispatch
//! - [`io`] - Request wire format, readers, and CSV seed/export
//! - [`strategy`] - Complete serve pipelines
//!
//! # Operations
//!
//! - **transactionConnection**: one page of transactions, optionally filtered
//!   by currency and sorted by a field
//! - **currencies**: the currency catalog
//! - **addTransaction**: store a new transaction under a fresh id
//! - **updateTransaction**: replace the fields of an existing transaction
//! - **deleteTransaction**: remove one transaction
//! - **deleteTransactionsBulk**: remove many transactions, counting the hits

pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{query_transactions, LedgerEngine, RecordStore, SeedConfig, TransactionStore};
pub use io::write_transactions_csv;
pub use types::{
    Currency, LedgerError, NewTransaction, QueryParams, Request, Response, SortKey, SortOrder,
    Transaction, TransactionConnection, TransactionId,
};
