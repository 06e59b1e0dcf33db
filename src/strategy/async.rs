//! Asynchronous batch processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait. Requests are read in batches; every request of
//! a batch runs as its own task against a shared store.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batched request reading)
//!     ├── BatchProcessor (one task per request)
//!     └── AsyncLedgerEngine
//!         └── AsyncTransactionStore (DashMap + atomic id counter)
//! ```
//!
//! # Ordering
//!
//! Batches run one after another, so a request always observes every
//! request from earlier batches. Inside a batch there is no ordering between
//! requests. Responses are written in request order regardless.

use crate::core::r#async::{AsyncLedgerEngine, AsyncTransactionStore, BatchProcessor};
use crate::core::seed::{seed_store, SeedConfig};
use crate::io::async_reader::AsyncReader;
use crate::io::request_format::write_response;
use crate::strategy::ProcessingStrategy;
use crate::types::{LedgerError, Transaction};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how requests are batched and the number of worker threads.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    /// Number of requests per batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// A zero for either value falls back to its default with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                default = default.batch_size,
                "invalid batch_size 0, using default"
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                default = default.max_concurrent_batches,
                "invalid max_concurrent_batches 0, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// # Configuration
///
/// - `batch_size`: Number of requests per batch (default: 1000)
/// - `max_concurrent_batches`: Number of worker threads (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
    /// How to populate the store before the first batch
    seed: SeedConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    ///
    /// # Arguments
    ///
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    /// * `seed` - Seed configuration for the shared store
    pub fn new(config: BatchConfig, seed: SeedConfig) -> Self {
        Self { config, seed }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Serve requests in concurrent batches
    ///
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Seeds the store, then shares it behind an `Arc`
    /// 3. Reads a batch, runs it to completion, and writes its responses
    /// 4. Repeats until the input is exhausted
    /// 5. Returns the final store contents
    fn process(
        &self,
        input_path: Option<&Path>,
        output: &mut dyn Write,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .enable_all()
            .build()
            .map_err(|e| LedgerError::io("Failed to create tokio runtime", e))?;

        runtime.block_on(async {
            let mut store = AsyncTransactionStore::new();
            seed_store(&mut store, &self.seed);
            let store = Arc::new(store);

            let processor = BatchProcessor::new(AsyncLedgerEngine::new(Arc::clone(&store)));
            let mut reader = AsyncReader::open(input_path).await?;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await?;
                if batch.is_empty() {
                    break;
                }

                // Next batch is read only once this one has fully completed.
                for response in processor.process_batch(batch).await {
                    write_response(&response, output)?;
                }
            }

            output
                .flush()
                .map_err(|e| LedgerError::io("Failed to flush output", e))?;

            tracing::info!(transactions = store.count(), "requests served");
            Ok(store.transactions())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::Value;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary request file for testing
    fn create_temp_requests(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn responses(output: Vec<u8>) -> Vec<Value> {
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[rstest]
    #[case::zero_batch_size(0, 4, BatchConfig::default().batch_size, 4)]
    #[case::zero_workers(10, 0, 10, num_cpus::get())]
    #[case::custom(10, 4, 10, 4)]
    fn test_batch_config_new(
        #[case] batch_size: usize,
        #[case] workers: usize,
        #[case] expected_batch_size: usize,
        #[case] expected_workers: usize,
    ) {
        let config = BatchConfig::new(batch_size, workers);

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_workers);
    }

    #[test]
    fn test_responses_in_request_order() {
        let file = create_temp_requests(
            "{\"requestId\":1,\"op\":\"currencies\"}\n\
             {\"requestId\":2,\"op\":\"deleteTransaction\",\"id\":42}\n\
             {\"requestId\":3,\"op\":\"nope\"}\n\
             {\"requestId\":4,\"op\":\"transactionConnection\",\"page\":0,\"pageSize\":1}\n",
        );
        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(10, 2), SeedConfig::fixed_only());
        let mut output = Vec::new();

        strategy.process(Some(file.path()), &mut output).unwrap();

        let responses = responses(output);
        let ids: Vec<u64> = responses
            .iter()
            .map(|r| r["requestId"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(responses[1]["data"]["ok"], false);
        assert_eq!(responses[2]["error"]["kind"], "invalidRequest");
        assert_eq!(responses[3]["data"]["pageInfo"]["hasNextPage"], true);
    }

    #[test]
    fn test_later_batches_observe_earlier_ones() {
        let file = create_temp_requests(
            "{\"requestId\":1,\"op\":\"deleteTransactionsBulk\",\"idList\":[0,1]}\n\
             {\"requestId\":2,\"op\":\"transactionConnection\",\"page\":0,\"pageSize\":10}\n",
        );
        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(1, 2), SeedConfig::fixed_only());
        let mut output = Vec::new();

        let transactions = strategy.process(Some(file.path()), &mut output).unwrap();

        let responses = responses(output);
        assert_eq!(responses[0]["data"]["okCount"], 2);
        assert_eq!(responses[1]["data"]["pageInfo"]["totalCount"], 1);
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].id, 2);
    }

    #[test]
    fn test_async_strategy_handles_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default(), SeedConfig::fixed_only());
        let mut output = Vec::new();

        let result = strategy.process(Some(Path::new("nonexistent.jsonl")), &mut output);

        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }
}
