//! Currency catalog types
//!
//! The catalog is static: three currencies registered at startup, never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// A currency known to the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// Unique currency code, e.g. `EUR`
    pub code: String,

    /// Human-readable name
    pub name: String,
}

/// Seed catalog as `(code, name)` pairs, in registration order
pub const CURRENCY_CATALOG: [(&str, &str); 3] = [
    ("BTC", "Bitcoin"),
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
];

impl Currency {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Currency {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Build the fixed catalog in its registration order
    pub fn catalog() -> Vec<Currency> {
        CURRENCY_CATALOG
            .iter()
            .map(|(code, name)| Currency::new(*code, *name))
            .collect()
    }
}
