//! Query parameters and response shapes
//!
//! Defines the paging/ordering/filtering parameters accepted by the query
//! engine and the connection-style page it returns, plus the small
//! acknowledgement types returned by the delete mutations.

use super::transaction::Transaction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a direction name
    ///
    /// Only `"desc"` selects descending order; every other value, including
    /// an empty string, selects ascending.
    pub fn from_name(name: &str) -> Self {
        if name == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field a page is ordered by
///
/// Field names outside the known set map to `Unrecognized`, which compares
/// every pair of records as equal so the stable sort keeps their original
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Id,
    Uuid,
    Amount,
    Currency,
    #[default]
    Unrecognized,
}

impl SortKey {
    /// Map a field name to its sort key
    pub fn from_name(name: &str) -> Self {
        match name {
            "id" => SortKey::Id,
            "uuid" => SortKey::Uuid,
            "amount" => SortKey::Amount,
            "currency" => SortKey::Currency,
            _ => SortKey::Unrecognized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Uuid => "uuid",
            SortKey::Amount => "amount",
            SortKey::Currency => "currency",
            SortKey::Unrecognized => "<unrecognized>",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a transaction page query
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    /// Zero-based page index
    pub page: usize,

    /// Maximum number of items per page
    pub page_size: usize,

    pub order: SortOrder,

    pub order_by: SortKey,

    /// Currency code to match exactly; empty matches every record
    pub filter: String,
}

impl QueryParams {
    pub fn new(page: usize, page_size: usize) -> Self {
        QueryParams {
            page,
            page_size,
            ..Default::default()
        }
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order_by(mut self, key: SortKey) -> Self {
        self.order_by = key;
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Index of the first record on the requested page
    ///
    /// Saturates instead of overflowing so absurd page numbers simply land
    /// past the end of the result set.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }
}

/// A record paired with its position on the current page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEdge {
    pub node: Transaction,

    /// Page-relative index, not an opaque continuation token
    pub cursor: usize,
}

/// Metadata about the full matching result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Number of records matching the filter, before paging
    pub total_count: usize,

    pub has_next_page: bool,
}

/// One page of transactions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionConnection {
    pub edges: Vec<TransactionEdge>,
    pub page_info: PageInfo,
}

impl TransactionConnection {
    /// Iterate over the page's transactions in page order
    pub fn items(&self) -> impl Iterator<Item = &Transaction> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Result of a single delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// True iff a record existed for the id
    pub ok: bool,
}

/// Result of a bulk delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
    /// Number of ids that referred to an existing record
    pub ok_count: usize,
}
