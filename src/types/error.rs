//! Error types for the ledger
//!
//! This module defines every error that can surface from the store, the
//! request layer, and the CSV import/export helpers.
//!
//! # Error Categories
//!
//! - **Not Found**: an update referencing an absent transaction id. Deletes
//!   never raise it; they report the miss through `ok`/`okCount` instead.
//! - **Invalid Request**: a request line that cannot be decoded. The serve
//!   loop answers it with an error response and keeps going.
//! - **I/O and CSV Errors**: fatal problems reading input, seed files, or
//!   writing output.

use crate::types::TransactionId;
use thiserror::Error;

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Transaction id does not exist
    ///
    /// Maps to a client error when surfaced over the request layer.
    #[error("Transaction {id} not found for {operation}")]
    NotFound {
        /// The id that was not found
        id: TransactionId,
        /// Operation that failed
        operation: String,
    },

    /// Request could not be decoded
    #[error("Invalid request{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    InvalidRequest {
        /// Input line number (if available)
        line: Option<u64>,
        /// Description of the decoding failure
        message: String,
    },

    /// I/O error occurred while reading or writing
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },

    /// Malformed CSV data
    #[error("CSV error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    Csv {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the CSV error
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::Csv {
            line,
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create a NotFound error
    pub fn not_found(id: TransactionId, operation: &str) -> Self {
        LedgerError::NotFound {
            id,
            operation: operation.to_string(),
        }
    }

    /// Create an InvalidRequest error
    pub fn invalid_request(line: Option<u64>, message: impl Into<String>) -> Self {
        LedgerError::InvalidRequest {
            line,
            message: message.into(),
        }
    }

    /// Create an Io error from a context string and the underlying error
    pub fn io(context: &str, error: impl std::fmt::Display) -> Self {
        LedgerError::Io {
            message: format!("{}: {}", context, error),
        }
    }

    /// Stable identifier used in error responses
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::NotFound { .. } => "notFound",
            LedgerError::InvalidRequest { .. } => "invalidRequest",
            LedgerError::Io { .. } => "io",
            LedgerError::Csv { .. } => "csv",
        }
    }

    /// Whether the caller, rather than the ledger, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LedgerError::NotFound { .. } | LedgerError::InvalidRequest { .. }
        )
    }
}
