//! Polars views over raw tables.
//!
//! A raw table becomes a frame of nullable string columns named by
//! [`normalize_columns`]. Polars rejects duplicate column names, so the
//! normalization is what makes every table representable.

use polars::prelude::{AnyValue, Column, DataFrame, IntoColumn, NamedFrom, Series};

use clinrep_model::RawTable;

use crate::error::Result;
use crate::normalize::normalize_columns;

/// Builds a frame from a raw table. Data rows are padded or cut to the
/// header width.
pub fn table_frame(table: &RawTable) -> Result<DataFrame> {
    let names = normalize_columns(table.header());
    let height = table.data_rows().len();
    let mut values: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(height); names.len()];
    for row in table.data_rows() {
        for (index, column) in values.iter_mut().enumerate() {
            column.push(row.get(index).cloned().flatten());
        }
    }
    let columns: Vec<Column> = names
        .iter()
        .zip(values)
        .map(|(name, column)| Series::new(name.as_str().into(), column).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// Selects columns by position and renames them.
///
/// Returns `None` when any position is outside the frame.
pub fn select_renamed(frame: &DataFrame, picks: &[(usize, &str)]) -> Result<Option<DataFrame>> {
    let columns = frame.get_columns();
    let mut selected = Vec::with_capacity(picks.len());
    for &(index, name) in picks {
        let Some(column) = columns.get(index) else {
            return Ok(None);
        };
        selected.push(column.clone().with_name(name.into()));
    }
    Ok(Some(DataFrame::new(selected)?))
}

/// Reads a whole column as optional strings.
pub fn column_values(frame: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = frame.column(name)?;
    let mut values = Vec::with_capacity(frame.height());
    for index in 0..frame.height() {
        values.push(any_to_string(column.get(index)?));
    }
    Ok(values)
}

/// Column names in frame order.
pub fn column_names(frame: &DataFrame) -> Vec<String> {
    frame
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Converts a Polars AnyValue to a string; `None` for null.
pub fn any_to_string(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(s) => Some(s.to_string()),
        AnyValue::StringOwned(s) => Some(s.to_string()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        RawTable::from_strs(&[
            &[Some("Domain"), Some("Raw"), Some("Raw"), Some("Percentile")],
            &[Some("Composite Memory"), Some("90"), Some("95"), Some("37")],
            &[Some("Verbal Memory"), None],
        ])
    }

    #[test]
    fn frame_uses_normalized_names() {
        let frame = table_frame(&sample()).unwrap();
        assert_eq!(column_names(&frame), vec!["Domain", "Raw_1", "Raw_2", "Percentile"]);
        assert_eq!(frame.height(), 2);
    }

    #[test]
    fn short_rows_are_padded_with_nulls() {
        let frame = table_frame(&sample()).unwrap();
        let values = column_values(&frame, "Percentile").unwrap();
        assert_eq!(values, vec![Some("37".to_string()), None]);
    }

    #[test]
    fn select_renamed_by_position() {
        let frame = table_frame(&sample()).unwrap();
        let selected = select_renamed(&frame, &[(0, "Domain Scores"), (3, "Percentile")])
            .unwrap()
            .expect("columns present");
        let domains = column_values(&selected, "Domain Scores").unwrap();
        assert_eq!(domains[1].as_deref(), Some("Verbal Memory"));
        assert!(
            select_renamed(&frame, &[(7, "Missing")])
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn empty_table_gives_empty_frame() {
        let frame = table_frame(&RawTable::default()).unwrap();
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 0);
    }
}
