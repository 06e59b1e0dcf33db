//! Transaction-related types for the ledger
//!
//! This module defines the stored transaction record and the client-supplied
//! payload used to create or overwrite one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction identifier
///
/// Assigned by the store at creation time, monotonically increasing and
/// never reused, even after the transaction is deleted.
pub type TransactionId = u64;

/// A stored transaction
///
/// The `currency` field should name a code from the currency catalog, but it
/// is not validated: an unknown code is stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier
    pub id: TransactionId,

    /// Client-supplied identifier (not guaranteed unique)
    pub uuid: String,

    /// Signed transaction amount
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    /// Currency code, e.g. `BTC`
    pub currency: String,
}

/// Client-supplied transaction fields
///
/// Carries everything a transaction holds except its identifier. Used by
/// both `add` (the store assigns the id) and `update` (the id is kept).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub uuid: String,

    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,

    pub currency: String,
}

impl NewTransaction {
    /// Create a new payload from its parts
    pub fn new(uuid: impl Into<String>, amount: Decimal, currency: impl Into<String>) -> Self {
        NewTransaction {
            uuid: uuid.into(),
            amount,
            currency: currency.into(),
        }
    }

    /// Attach a store-assigned identifier, producing the stored record
    pub fn with_id(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            uuid: self.uuid,
            amount: self.amount,
            currency: self.currency,
        }
    }
}
