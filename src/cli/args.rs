use crate::core::SeedConfig;
use crate::io::csv_format::load_seed_file;
use crate::strategy::BatchConfig;
use crate::types::LedgerError;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Serve transaction ledger requests over JSON lines
#[derive(Parser, Debug)]
#[command(name = "tx-ledger")]
#[command(about = "Serve transaction ledger requests over JSON lines", long_about = None)]
pub struct CliArgs {
    /// Request file, one JSON request per line
    #[arg(
        value_name = "INPUT",
        help = "Path to the request file ('-' or omitted for stdin)"
    )]
    pub input_file: Option<PathBuf>,

    /// Processing strategy to use for serving requests
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for in-order or 'async' for concurrent batches"
    )]
    pub strategy: StrategyType,

    /// Number of random transactions generated at startup
    #[arg(long = "seed-count", value_name = "COUNT", default_value_t = 10_000)]
    pub seed_count: usize,

    /// Seed of the random generator used at startup
    #[arg(long = "seed", value_name = "SEED", default_value_t = 0)]
    pub seed: u64,

    /// CSV file of extra rows (uuid,amount,currency) added after seeding
    #[arg(long = "seed-file", value_name = "PATH")]
    pub seed_file: Option<PathBuf>,

    /// Write the final store as CSV to this path
    #[arg(long = "export", value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Number of requests per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of requests per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Log level for the ledger's own messages, overridden by RUST_LOG
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Values not given on the command line take their defaults; a zero falls
    /// back to the default with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create a SeedConfig from CLI arguments
    ///
    /// Reads the seed file, if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed file cannot be opened or holds a
    /// malformed row.
    pub fn to_seed_config(&self) -> Result<SeedConfig, LedgerError> {
        let config = SeedConfig::new(self.seed_count, self.seed);
        match &self.seed_file {
            Some(path) => Ok(config.with_extra_rows(load_seed_file(path)?)),
            None => Ok(config),
        }
    }

    /// Request source, `None` meaning stdin
    pub fn input_path(&self) -> Option<&Path> {
        self.input_file
            .as_deref()
            .filter(|path| *path != Path::new("-"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[rstest]
    #[case::default_strategy(&["program"], StrategyType::Sync)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "in.jsonl"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "in.jsonl"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.strategy, expected);
    }

    #[rstest]
    #[case::omitted(&["program"], None)]
    #[case::dash(&["program", "-"], None)]
    #[case::file(&["program", "in.jsonl"], Some(Path::new("in.jsonl")))]
    fn test_input_path(#[case] args: &[&str], #[case] expected: Option<&Path>) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.input_path(), expected);
    }

    #[rstest]
    #[case::defaults(&["program"], 10_000, 0)]
    #[case::custom(&["program", "--seed-count", "5", "--seed", "42"], 5, 42)]
    #[case::no_random_rows(&["program", "--seed-count", "0"], 0, 0)]
    fn test_seed_config_conversion(
        #[case] args: &[&str],
        #[case] expected_count: usize,
        #[case] expected_seed: u64,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_seed_config().unwrap();

        assert_eq!(config, SeedConfig::new(expected_count, expected_seed));
    }

    #[test]
    fn test_seed_config_loads_seed_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "uuid,amount,currency\nx,1.5,USD").expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        let path = file.path().to_string_lossy().to_string();

        let parsed = CliArgs::try_parse_from(["program", "--seed-file", path.as_str()]).unwrap();
        let config = parsed.to_seed_config().unwrap();

        assert_eq!(config.extra_rows.len(), 1);
        assert_eq!(config.extra_rows[0].uuid, "x");
    }

    #[test]
    fn test_seed_config_missing_seed_file() {
        let parsed =
            CliArgs::try_parse_from(["program", "--seed-file", "no-such-seed.csv"]).unwrap();

        assert!(matches!(
            parsed.to_seed_config(),
            Err(LedgerError::Io { .. })
        ));
    }

    #[rstest]
    #[case::all_defaults(&["program"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "--max-concurrent", "0"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[test]
    fn test_log_level_default() {
        let parsed = CliArgs::try_parse_from(["program"]).unwrap();
        assert_eq!(parsed.log_level, "info");
    }

    #[rstest]
    #[case::invalid_strategy(&["program", "--strategy", "invalid"])]
    #[case::negative_seed_count(&["program", "--seed-count", "-1"])]
    #[case::non_numeric_seed(&["program", "--seed", "abc"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
