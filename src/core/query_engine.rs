//! Query engine: filtering, stable ordering and paging
//!
//! Given a snapshot of the record set and a set of `QueryParams`, the engine
//! produces one deterministic page of transactions:
//!
//! 1. keep records whose currency equals `filter` (all records when the
//!    filter is empty)
//! 2. stable-sort them by `order_by`, inverted for descending order
//! 3. count the filtered set
//! 4. slice the window `[page * page_size, page * page_size + page_size)`
//! 5. set `has_next_page = page * page_size + 1 < total_count`
//!
//! Out-of-range windows produce an empty page, never an error.
//!
//! # Stability
//!
//! Records are paired with their snapshot index before sorting and the index
//! breaks every tie, so records that compare equal keep their snapshot
//! (insertion) order in both directions. An unrecognized sort key compares
//! everything as equal and therefore leaves the snapshot order untouched.

use crate::core::traits::RecordStore;
use crate::types::{
    PageInfo, QueryParams, SortKey, SortOrder, Transaction, TransactionConnection,
    TransactionEdge,
};
use std::cmp::Ordering;

/// Run a page query against a store
///
/// The store is read once; the page reflects its contents at call time.
pub fn query_transactions<S>(store: &S, params: &QueryParams) -> TransactionConnection
where
    S: RecordStore + ?Sized,
{
    tracing::info!(
        page = params.page,
        page_size = params.page_size,
        order = %params.order,
        order_by = %params.order_by,
        filter = %params.filter,
        "transactions query"
    );

    paginate(store.snapshot(), params)
}

/// Filter, sort and slice an already materialized record set
///
/// `records` must be in insertion order; that order is what ties fall back
/// to.
pub fn paginate(records: Vec<Transaction>, params: &QueryParams) -> TransactionConnection {
    let filtered = filter_by_currency(records, &params.filter);
    let total_count = filtered.len();

    let sorted = stable_sort(filtered, params.order, params.order_by);

    let offset = params.offset();
    let edges = sorted
        .into_iter()
        .skip(offset)
        .take(params.page_size)
        .enumerate()
        .map(|(cursor, node)| TransactionEdge { node, cursor })
        .collect();

    TransactionConnection {
        edges,
        page_info: PageInfo {
            total_count,
            has_next_page: offset.saturating_add(1) < total_count,
        },
    }
}

/// Keep records whose currency equals `filter`; an empty filter keeps all
pub fn filter_by_currency(mut records: Vec<Transaction>, filter: &str) -> Vec<Transaction> {
    if !filter.is_empty() {
        records.retain(|tx| tx.currency == filter);
    }
    records
}

/// Natural ascending ordering of two records on one field
///
/// Amounts compare numerically, ids by their integer value, uuid and
/// currency lexicographically.
pub fn compare_field(key: SortKey, a: &Transaction, b: &Transaction) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Uuid => a.uuid.cmp(&b.uuid),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Currency => a.currency.cmp(&b.currency),
        SortKey::Unrecognized => Ordering::Equal,
    }
}

/// Sort records by one field, keeping equal records in their input order
pub fn stable_sort(records: Vec<Transaction>, order: SortOrder, key: SortKey) -> Vec<Transaction> {
    let mut decorated: Vec<(usize, Transaction)> = records.into_iter().enumerate().collect();

    // The index tie-break makes every key distinct, so an unstable sort is
    // enough to get a stable result.
    decorated.sort_unstable_by(|(index_a, a), (index_b, b)| {
        let by_field = match order {
            SortOrder::Asc => compare_field(key, a, b),
            SortOrder::Desc => compare_field(key, b, a),
        };
        by_field.then_with(|| index_a.cmp(index_b))
    });

    decorated.into_iter().map(|(_, tx)| tx).collect()
}
