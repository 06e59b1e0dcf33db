//! Processing strategy module for serving request streams
//!
//! This module defines the Strategy pattern for the complete serve pipeline:
//! seeding a store, reading request lines, dispatching them, and writing
//! response lines. Different implementations (synchronous, asynchronous
//! batch) can be selected at runtime.

use crate::cli::StrategyType;
use crate::core::SeedConfig;
use crate::types::{LedgerError, Transaction};
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete serve pipelines
///
/// Each strategy seeds its own store, answers every request line from the
/// input, and hands back the final state of the store.
pub trait ProcessingStrategy: Send + Sync {
    /// Serve requests from the input and write one response line per request
    ///
    /// # Arguments
    ///
    /// * `input_path` - Request file, or `None`/`-` for stdin
    /// * `output` - Mutable reference to a writer for response lines
    ///
    /// # Returns
    ///
    /// * `Ok(transactions)` - the store contents after the last request,
    ///   sorted by id
    /// * `Err(LedgerError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input cannot be opened or read
    /// - Output cannot be written
    ///
    /// Requests that fail (malformed lines, updates of absent ids) are
    /// answered with an error response and do not stop processing.
    fn process(
        &self,
        input_path: Option<&Path>,
        output: &mut dyn Write,
    ) -> Result<Vec<Transaction>, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `seed` - How to populate the store before the first request
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    seed: SeedConfig,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(seed)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, seed))
        }
    }
}
