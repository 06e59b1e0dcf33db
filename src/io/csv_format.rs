//! CSV format handling for seed rows and snapshot export
//!
//! This module centralizes all CSV concerns:
//! - CsvRecord structure for deserializing seed rows (`uuid,amount,currency`)
//! - Conversion from CSV records to transaction payloads
//! - Snapshot serialization (`id,uuid,amount,currency`)

use crate::types::{LedgerError, NewTransaction, Transaction};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

/// One seed row as it appears in the file
///
/// The amount is kept as text so a bad value can be reported with its line.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub uuid: String,
    pub amount: String,
    pub currency: String,
}

/// Convert a CsvRecord to a NewTransaction
///
/// # Arguments
///
/// * `csv_record` - The deserialized CSV record
/// * `line` - Line number of the record, used in error messages
///
/// # Returns
///
/// * `Ok(NewTransaction)` - Successfully converted record
/// * `Err(LedgerError::Csv)` - The amount is missing or not a decimal
pub fn convert_csv_record(csv_record: CsvRecord, line: u64) -> Result<NewTransaction, LedgerError> {
    let amount_str = csv_record.amount.trim();
    if amount_str.is_empty() {
        return Err(LedgerError::Csv {
            line: Some(line),
            message: format!("Transaction '{}' requires an amount", csv_record.uuid),
        });
    }

    let amount = Decimal::from_str(amount_str).map_err(|_| LedgerError::Csv {
        line: Some(line),
        message: format!(
            "Invalid amount '{}' for transaction '{}'",
            csv_record.amount, csv_record.uuid
        ),
    })?;

    Ok(NewTransaction::new(
        csv_record.uuid,
        amount,
        csv_record.currency,
    ))
}

/// Read seed rows from any CSV source
///
/// The first malformed row aborts the read.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<Vec<NewTransaction>, LedgerError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |pos| pos.line());
        let csv_record: CsvRecord = record.deserialize(Some(&headers))?;
        rows.push(convert_csv_record(csv_record, line)?);
    }
    Ok(rows)
}

/// Load seed rows from a file
pub fn load_seed_file(path: &Path) -> Result<Vec<NewTransaction>, LedgerError> {
    let file = File::open(path).map_err(|e| {
        LedgerError::io(&format!("Failed to open seed file '{}'", path.display()), e)
    })?;
    let rows = read_transactions_csv(file)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "seed file loaded");
    Ok(rows)
}

/// Write a store snapshot to CSV format
///
/// Writes columns id, uuid, amount, currency. Rows are sorted by id for
/// deterministic output.
///
/// # Arguments
///
/// * `transactions` - Snapshot of the store
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = csv::Writer::from_writer(output);

    writer
        .write_record(["id", "uuid", "amount", "currency"])
        .map_err(|e| LedgerError::io("Failed to write CSV header", e))?;

    let mut sorted = transactions.to_vec();
    sorted.sort_by_key(|tx| tx.id);

    for tx in sorted {
        writer
            .write_record(&[
                tx.id.to_string(),
                tx.uuid,
                tx.amount.to_string(),
                tx.currency,
            ])
            .map_err(|e| LedgerError::io("Failed to write transaction record", e))?;
    }

    writer
        .flush()
        .map_err(|e| LedgerError::io("Failed to flush output", e))?;

    Ok(())
}
