//! Asynchronous request reader with batch interface
//!
//! Reads request lines from any tokio `AsyncBufRead` source and hands them
//! out in batches for concurrent processing.
//!
//! # Architecture
//!
//! ```text
//! tokio reader → AsyncReader → Batches of RequestEnvelopes
//!                    ↓
//!           request_format module
//!           (decode_request_bytes)
//! ```

use crate::io::request_format::{decode_request_bytes, RequestEnvelope};
use crate::types::LedgerError;
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Split};

/// Asynchronous line reader
///
/// Lines are split on raw `\n` bytes so that a line which is not valid
/// UTF-8 is answered as a bad request instead of failing the read.
pub struct AsyncReader<R: AsyncBufRead + Unpin> {
    lines: Split<R>,
    line_num: u64,
}

impl AsyncReader<Box<dyn AsyncBufRead + Unpin + Send>> {
    /// Open a request source
    ///
    /// `None` or a path of `-` reads stdin; anything else opens that file.
    pub async fn open(path: Option<&Path>) -> Result<Self, LedgerError> {
        let reader: Box<dyn AsyncBufRead + Unpin + Send> = match path {
            Some(path) if path != Path::new("-") => {
                let file = tokio::fs::File::open(path).await.map_err(|e| {
                    LedgerError::io(&format!("Failed to open file '{}'", path.display()), e)
                })?;
                Box::new(BufReader::new(file))
            }
            _ => Box::new(BufReader::new(tokio::io::stdin())),
        };
        Ok(AsyncReader::new(reader))
    }
}

impl<R: AsyncBufRead + Unpin> AsyncReader<R> {
    /// Wrap any buffered async reader
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_num: 0,
        }
    }

    /// Read a batch of request envelopes
    ///
    /// Reads up to `batch_size` non-blank lines. Lines that fail to decode,
    /// including ones that are not valid UTF-8, are included as envelopes
    /// carrying their error.
    ///
    /// # Returns
    ///
    /// * `Ok(batch)` - an empty batch means the input is exhausted
    /// * `Err(LedgerError::Io)` - the underlying read failed
    pub async fn read_batch(
        &mut self,
        batch_size: usize,
    ) -> Result<Vec<RequestEnvelope>, LedgerError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            let line = self.lines.next_segment().await.map_err(|e| {
                LedgerError::io(&format!("Failed to read line {}", self.line_num + 1), e)
            })?;

            match line {
                Some(line) => {
                    self.line_num += 1;
                    if let Some(envelope) = decode_request_bytes(&line, self.line_num) {
                        batch.push(envelope);
                    }
                }
                None => break,
            }
        }

        Ok(batch)
    }
}
