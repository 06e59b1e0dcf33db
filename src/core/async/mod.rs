//! Concurrent implementations of the core components
//!
//! The store keeps records in a DashMap and hands out ids from an atomic
//! counter, so every operation takes `&self` and the store can be shared
//! behind an `Arc`:
//!
//! - **AsyncTransactionStore**: thread-safe record store
//! - **AsyncLedgerEngine**: request dispatch over the shared store
//! - **BatchProcessor**: runs a batch of requests as concurrent tasks
//!
//! Each operation is atomic per record. A query copies the records shard by
//! shard before filtering, so with writes in flight it reflects some
//! interleaving of them rather than a single point in time.

pub mod batch_processor;
pub mod engine;
pub mod transaction_store;

pub use batch_processor::BatchProcessor;
pub use engine::AsyncLedgerEngine;
pub use transaction_store::AsyncTransactionStore;
