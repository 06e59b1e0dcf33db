//! Transaction Ledger CLI
//!
//! Serves ledger requests read as JSON lines and writes one JSON response
//! line per request to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- requests.jsonl > responses.jsonl
//! cat requests.jsonl | cargo run -- --seed-count 100 --seed 7
//! cargo run -- --strategy async --batch-size 500 --max-concurrent 8 requests.jsonl
//! cargo run -- --seed-file extra.csv --export final.csv requests.jsonl
//! ```
//!
//! # Processing Strategies
//!
//! - **sync**: Requests answered strictly in order (default)
//! - **async**: Requests run concurrently within a batch, batches in order
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (input or seed file not readable, output not writable, etc.)

use std::fs::File;
use std::io::BufWriter;
use std::process;
use tx_ledger::cli;
use tx_ledger::io::write_transactions_csv;
use tx_ledger::strategy;
use tx_ledger::types::LedgerError;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &cli::CliArgs) -> Result<(), LedgerError> {
    let seed = args.to_seed_config()?;

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, seed, config)
    };

    let mut output = BufWriter::new(std::io::stdout().lock());
    let transactions = strategy.process(args.input_path(), &mut output)?;

    if let Some(path) = &args.export {
        let file = File::create(path).map_err(|e| {
            LedgerError::io(&format!("Failed to create export file '{}'", path.display()), e)
        })?;
        write_transactions_csv(&transactions, &mut BufWriter::new(file))?;
        tracing::info!(path = %path.display(), rows = transactions.len(), "store exported");
    }

    Ok(())
}
