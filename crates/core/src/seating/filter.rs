//! Group filtering for the table canvas.
//!
//! Groups are visual only: they narrow which tables are shown and feed the
//! per-group badge counts. Both are recomputed on demand; arrangements hold
//! tens of tables, not thousands.

use std::collections::BTreeMap;

use crate::types::DbId;

/// Anything that may belong to a table group.
pub trait Grouped {
    fn group_id(&self) -> Option<DbId>;
}

/// Tables visible under the current group selection.
///
/// `None` shows everything.
pub fn visible_tables<T: Grouped>(tables: &[T], selected_group: Option<DbId>) -> Vec<&T> {
    match selected_group {
        None => tables.iter().collect(),
        Some(group) => tables
            .iter()
            .filter(|t| t.group_id() == Some(group))
            .collect(),
    }
}

/// Number of tables in each group. Ungrouped tables are not counted.
pub fn table_count_per_group<T: Grouped>(tables: &[T]) -> BTreeMap<DbId, usize> {
    tables
        .iter()
        .filter_map(Grouped::group_id)
        .fold(BTreeMap::new(), |mut counts, group| {
            *counts.entry(group).or_insert(0) += 1;
            counts
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct T(Option<DbId>);

    impl Grouped for T {
        fn group_id(&self) -> Option<DbId> {
            self.0
        }
    }

    fn tables() -> Vec<T> {
        vec![T(Some(1)), T(None), T(Some(2)), T(Some(1))]
    }

    #[test]
    fn no_selection_shows_all() {
        assert_eq!(visible_tables(&tables(), None).len(), 4);
    }

    #[test]
    fn selection_narrows_to_group() {
        let all = tables();
        let visible = visible_tables(&all, Some(1));
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|t| t.0 == Some(1)));
    }

    #[test]
    fn empty_group_then_clear_restores() {
        let all = tables();
        assert!(visible_tables(&all, Some(99)).is_empty());
        assert_eq!(visible_tables(&all, None).len(), all.len());
    }

    #[test]
    fn counts_skip_ungrouped() {
        let counts = table_count_per_group(&tables());
        assert_eq!(counts.get(&1), Some(&2));
        assert_eq!(counts.get(&2), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
