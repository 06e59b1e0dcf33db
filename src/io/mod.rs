//! I/O module
//!
//! Handles the request wire format, input readers, and CSV seed/export files.
//!
//! # Components
//!
//! - `request_format` - JSON-lines request decoding and response encoding
//! - `sync_reader` - Synchronous request reader with iterator interface
//! - `async_reader` - Asynchronous request reader with batch reading interface
//! - `csv_format` - CSV seed import and snapshot export

pub mod async_reader;
pub mod csv_format;
pub mod request_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{load_seed_file, read_transactions_csv, write_transactions_csv, CsvRecord};
pub use request_format::{decode_request_line, write_response, RequestEnvelope, ResponseLine};
pub use sync_reader::SyncReader;
