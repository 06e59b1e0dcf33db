//! Concurrent batch processing of requests
//!
//! This module provides the `BatchProcessor` struct, which runs every request
//! of a batch as its own tokio task against a shared `AsyncLedgerEngine`.
//!
//! # Ordering
//!
//! Requests inside one batch have no ordering guarantee relative to each
//! other: a query may or may not observe a mutation submitted in the same
//! batch. Responses are still returned in request order, so each response
//! lines up with the request that produced it. Callers that need one
//! request to see another's effect put them in different batches.
//!
//! # Thread Safety
//!
//! The processor is cloneable and can be safely shared across async tasks.

use futures::future::join_all;

use super::AsyncLedgerEngine;
use crate::io::request_format::{log_request_failure, RequestEnvelope, ResponseLine};
use crate::types::LedgerError;

/// Batch processor running requests as independent tasks
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Shared request engine
    engine: AsyncLedgerEngine,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - AsyncLedgerEngine whose store every task shares
    pub fn new(engine: AsyncLedgerEngine) -> Self {
        Self { engine }
    }

    /// Answer a single request envelope
    ///
    /// Envelopes whose line failed to decode are answered with their decode
    /// error without touching the store.
    pub fn process_envelope(&self, envelope: RequestEnvelope) -> ResponseLine {
        let result = envelope
            .request
            .and_then(|request| self.engine.process_request(request))
            .inspect_err(|e| log_request_failure(envelope.line, envelope.request_id, e));
        ResponseLine::from_result(envelope.request_id, result)
    }

    /// Process a batch of requests concurrently
    ///
    /// This method:
    /// 1. Spawns one tokio task per request
    /// 2. Waits for all tasks to complete
    /// 3. Returns the responses in the order the requests were given
    ///
    /// A task that fails to join (it panicked) is answered with an I/O error
    /// response so the batch still yields one response per request.
    pub async fn process_batch(&self, batch: Vec<RequestEnvelope>) -> Vec<ResponseLine> {
        let mut request_ids = Vec::with_capacity(batch.len());
        let mut tasks = Vec::with_capacity(batch.len());

        for envelope in batch {
            request_ids.push(envelope.request_id);
            let processor = self.clone();
            tasks.push(tokio::spawn(
                async move { processor.process_envelope(envelope) },
            ));
        }

        join_all(tasks)
            .await
            .into_iter()
            .zip(request_ids)
            .map(|(joined, request_id)| match joined {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(?request_id, error = %e, "request task failed to join");
                    ResponseLine::from_result(
                        request_id,
                        Err(LedgerError::io("request task failed", e)),
                    )
                }
            })
            .collect()
    }
}
