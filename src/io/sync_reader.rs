//! Synchronous request reader with iterator interface
//!
//! Provides a streaming iterator over request envelopes read line by line
//! from a file or stdin. Decoding is delegated to the request_format module.
//!
//! # Iterator Interface
//!
//! SyncReader yields `Result<RequestEnvelope, LedgerError>`:
//!
//! ```no_run
//! use tx_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::open(Some(Path::new("requests.jsonl"))).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(envelope) => println!("request on line {}", envelope.line),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - A file that cannot be opened is reported by `open()`
//! - A read failure mid-stream is yielded as `Err` and ends iteration
//! - A line that fails to decode, including one that is not valid UTF-8,
//!   is still `Ok`: the envelope carries the decode error so it can be
//!   answered in place
//! - Blank lines are skipped

use crate::io::request_format::{decode_request_bytes, RequestEnvelope};
use crate::types::LedgerError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Synchronous line reader
pub struct SyncReader<R: BufRead> {
    reader: R,
    line_num: u64,
    failed: bool,
}

impl SyncReader<Box<dyn BufRead>> {
    /// Open a request source
    ///
    /// `None` or a path of `-` reads stdin; anything else opens that file.
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if the source is ready
    /// * `Err(LedgerError::Io)` if the file could not be opened
    pub fn open(path: Option<&Path>) -> Result<Self, LedgerError> {
        let reader: Box<dyn BufRead> = match path {
            Some(path) if path != Path::new("-") => {
                let file = File::open(path).map_err(|e| {
                    LedgerError::io(&format!("Failed to open file '{}'", path.display()), e)
                })?;
                Box::new(BufReader::with_capacity(8 * 1024, file))
            }
            _ => Box::new(BufReader::new(std::io::stdin())),
        };
        Ok(SyncReader::new(reader))
    }
}

impl<R: BufRead> SyncReader<R> {
    /// Wrap any buffered reader
    pub fn new(reader: R) -> Self {
        SyncReader {
            reader,
            line_num: 0,
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for SyncReader<R> {
    type Item = Result<RequestEnvelope, LedgerError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let mut line = Vec::new();
        loop {
            line.clear();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_num += 1;
                    if let Some(envelope) = decode_request_bytes(&line, self.line_num) {
                        return Some(Ok(envelope));
                    }
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(LedgerError::io(
                        &format!("Failed to read line {}", self.line_num + 1),
                        e,
                    )));
                }
            }
        }
    }
}
