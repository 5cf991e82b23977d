//! Table lookup strategies.
//!
//! Positional and content-addressed lookups are kept apart; callers choose
//! one explicitly.

use clinrep_model::RawTable;

/// Table at a fixed position in source order.
pub fn table_at(tables: &[RawTable], index: usize) -> Option<&RawTable> {
    tables.get(index)
}

/// First table, in source order, matching `predicate`.
pub fn find_table<P>(tables: &[RawTable], predicate: P) -> Option<&RawTable>
where
    P: Fn(&RawTable) -> bool,
{
    tables.iter().find(|table| predicate(table))
}
