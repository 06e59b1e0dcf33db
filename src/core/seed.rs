//! Deterministic store seeding
//!
//! Every store starts with three fixed transactions followed by a
//! configurable number of random ones. The random rows exist to give the
//! table something sizeable to page through; their volume and the RNG seed
//! come from `SeedConfig` so two stores built from the same config are
//! identical. Rows loaded from a seed file are appended last.

use crate::core::traits::RecordStore;
use crate::types::{NewTransaction, CURRENCY_CATALOG};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

/// Fixed rows inserted before any random data, as `(amount, currency)`
///
/// Amounts are `(mantissa, scale)` pairs: 1.0, -0.1, -0.2.
const FIXED_ROWS: [((i64, u32), &str); 3] = [((10, 1), "BTC"), ((-1, 1), "BTC"), ((-2, 1), "EUR")];

/// Random amounts fall in `[-AMOUNT_BOUND, AMOUNT_BOUND)` at this scale
const AMOUNT_SCALE: u32 = 4;
const AMOUNT_BOUND: i64 = 500 * 10_i64.pow(AMOUNT_SCALE);

/// Configuration for initial store contents
#[derive(Clone, Debug, PartialEq)]
pub struct SeedConfig {
    /// Number of random transactions appended after the fixed rows
    pub random_count: usize,
    /// Seed for the random number generator
    pub rng_seed: u64,
    /// Rows appended after the random ones, e.g. from a CSV seed file
    pub extra_rows: Vec<NewTransaction>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            random_count: 10_000,
            rng_seed: 0,
            extra_rows: Vec::new(),
        }
    }
}

impl SeedConfig {
    pub fn new(random_count: usize, rng_seed: u64) -> Self {
        Self {
            random_count,
            rng_seed,
            extra_rows: Vec::new(),
        }
    }

    pub fn with_extra_rows(mut self, rows: Vec<NewTransaction>) -> Self {
        self.extra_rows = rows;
        self
    }

    /// Only the three fixed rows, no random data
    pub fn fixed_only() -> Self {
        Self::new(0, 0)
    }
}

/// Fill a store with the fixed rows, then the random rows, then any extra rows
///
/// # Returns
///
/// The number of transactions added.
pub fn seed_store<S>(store: &mut S, config: &SeedConfig) -> usize
where
    S: RecordStore + ?Sized,
{
    let mut rng = StdRng::seed_from_u64(config.rng_seed);

    for ((mantissa, scale), currency) in FIXED_ROWS {
        let uuid = random_uuid(&mut rng);
        store.add_transaction(NewTransaction::new(
            uuid,
            Decimal::new(mantissa, scale),
            currency,
        ));
    }

    for _ in 0..config.random_count {
        let payload = random_transaction(&mut rng);
        store.add_transaction(payload);
    }

    for payload in &config.extra_rows {
        store.add_transaction(payload.clone());
    }

    let added = FIXED_ROWS.len() + config.random_count + config.extra_rows.len();
    tracing::info!(
        added,
        random_count = config.random_count,
        extra_rows = config.extra_rows.len(),
        rng_seed = config.rng_seed,
        "seeded transaction store"
    );
    added
}

fn random_uuid<R: Rng>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}

fn random_transaction<R: Rng>(rng: &mut R) -> NewTransaction {
    let uuid = random_uuid(rng);
    let amount = Decimal::new(rng.gen_range(-AMOUNT_BOUND..AMOUNT_BOUND), AMOUNT_SCALE);
    let (currency, _) = CURRENCY_CATALOG[rng.gen_range(0..CURRENCY_CATALOG.len())];

    NewTransaction::new(uuid, amount, currency)
}
