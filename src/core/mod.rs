//! Core ledger logic
//!
//! - `traits` - the `RecordStore` abstraction shared by both stores
//! - `transaction_store` - single-threaded record store
//! - `query_engine` - filter, stable sort, and paging
//! - `seed` - startup population of a store
//! - `engine` - request dispatch over a store
//! - `async` - concurrent store, engine, and batch processor

pub mod r#async;
pub mod engine;
pub mod query_engine;
pub mod seed;
pub mod traits;
pub mod transaction_store;

pub use engine::LedgerEngine;
pub use query_engine::query_transactions;
pub use r#async::{AsyncLedgerEngine, AsyncTransactionStore, BatchProcessor};
pub use seed::{seed_store, SeedConfig};
pub use traits::RecordStore;
pub use transaction_store::TransactionStore;
