//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. Requests are answered strictly in input order,
//! so every request observes the effects of all requests before it.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - Request decoding to `SyncReader` (iterator interface)
//! - Request handling to `LedgerEngine`
//! - Response encoding to `request_format::write_response`

use crate::core::{LedgerEngine, RecordStore, SeedConfig};
use crate::io::request_format::{log_request_failure, write_response, ResponseLine};
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{LedgerError, Transaction};
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use tx_ledger::core::SeedConfig;
/// use tx_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy::new(SeedConfig::default());
/// let mut output = io::stdout();
///
/// strategy.process(Some(Path::new("requests.jsonl")), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone)]
pub struct SyncProcessingStrategy {
    seed: SeedConfig,
}

impl SyncProcessingStrategy {
    pub fn new(seed: SeedConfig) -> Self {
        Self { seed }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Serve requests one at a time
    ///
    /// 1. Seeds a fresh `LedgerEngine`
    /// 2. Streams request envelopes from the input
    /// 3. Answers each envelope, writing the response immediately
    /// 4. Returns the final store contents
    fn process(
        &self,
        input_path: Option<&Path>,
        output: &mut dyn Write,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let mut engine = LedgerEngine::seeded(&self.seed);
        let reader = SyncReader::open(input_path)?;

        for result in reader {
            let envelope = result?;
            let result = envelope
                .request
                .and_then(|request| engine.process(request))
                .inspect_err(|e| log_request_failure(envelope.line, envelope.request_id, e));
            write_response(
                &ResponseLine::from_result(envelope.request_id, result),
                output,
            )?;
        }

        output
            .flush()
            .map_err(|e| LedgerError::io("Failed to flush output", e))?;

        tracing::info!(transactions = engine.store().len(), "requests served");
        Ok(engine.transactions())
    }
}
