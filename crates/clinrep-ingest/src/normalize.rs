//! Header row normalization.

use std::collections::{BTreeMap, BTreeSet};

use clinrep_model::Cell;

/// Turns a raw header row into unique column identifiers of the same length.
///
/// - absent cell: `Unnamed_<index>`
/// - value that occurs more than once: `<value>_<index>` at every occurrence
/// - otherwise the value unchanged
///
/// Identifiers that still collide after these rules (for example a literal
/// `Unnamed_0` header next to an absent cell) get `_<index>` appended again
/// until unique. Collision-free headers are unaffected.
pub fn normalize_columns(header: &[Cell]) -> Vec<String> {
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for value in header.iter().flatten() {
        *occurrences.entry(value.as_str()).or_default() += 1;
    }

    let mut used = BTreeSet::new();
    header
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let mut name = match cell {
                None => format!("Unnamed_{index}"),
                Some(value) if occurrences.get(value.as_str()).copied().unwrap_or(0) > 1 => {
                    format!("{value}_{index}")
                }
                Some(value) => value.clone(),
            };
            while used.contains(&name) {
                name = format!("{name}_{index}");
            }
            used.insert(name.clone());
            name
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn header(values: &[Option<&str>]) -> Vec<Cell> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn suffixes_every_duplicate_and_absent_cell() {
        let columns = normalize_columns(&header(&[
            Some("Domain"),
            None,
            Some("Score"),
            Some("Score"),
            Some("Percentile"),
        ]));
        assert_eq!(
            columns,
            vec!["Domain", "Unnamed_1", "Score_2", "Score_3", "Percentile"]
        );
    }

    #[test]
    fn all_absent_header() {
        let columns = normalize_columns(&header(&[None, None, None]));
        assert_eq!(columns, vec!["Unnamed_0", "Unnamed_1", "Unnamed_2"]);
    }

    #[test]
    fn resolves_residual_collisions() {
        let columns = normalize_columns(&header(&[None, Some("Unnamed_0")]));
        assert_eq!(columns, vec!["Unnamed_0", "Unnamed_0_1"]);

        let columns = normalize_columns(&header(&[Some("a_1"), Some("a"), Some("a")]));
        assert_eq!(columns, vec!["a_1", "a_1_1", "a_2"]);
    }

    proptest! {
        #[test]
        fn unique_stable_and_length_preserving(
            values in prop::collection::vec(prop::option::of("[ab_0-2]{0,3}"), 0..10)
        ) {
            let first = normalize_columns(&values);
            let second = normalize_columns(&values);
            prop_assert_eq!(first.len(), values.len());
            prop_assert_eq!(&first, &second);
            let unique: BTreeSet<&String> = first.iter().collect();
            prop_assert_eq!(unique.len(), first.len());
        }
    }
}
