use serde::{Deserialize, Serialize};

/// One table cell as produced by the layout service; `None` is an absent cell.
pub type Cell = Option<String>;

/// A raw table grid. Row 0 is the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a table from string literals, treating `None` as an absent cell.
    pub fn from_strs(rows: &[&[Option<&str>]]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.map(str::to_string)).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// The header row, or an empty slice for a table without rows.
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rows after the header.
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the table with every row cut to at most `width` cells.
    pub fn truncated(&self, width: usize) -> Self {
        Self::new(
            self.rows
                .iter()
                .map(|row| row.iter().take(width).cloned().collect())
                .collect(),
        )
    }

    /// Returns true when the header's leading cells equal `labels` (trimmed).
    pub fn header_starts_with(&self, labels: &[&str]) -> bool {
        let header = self.header();
        header.len() >= labels.len()
            && header
                .iter()
                .zip(labels)
                .all(|(cell, label)| cell.as_deref().map(str::trim) == Some(*label))
    }
}

/// Everything the source adapter yields for one document, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    #[serde(default)]
    pub tables: Vec<RawTable>,
    #[serde(default)]
    pub pages: Vec<String>,
}

impl SourceDocument {
    /// Page text concatenated in order, one newline between pages.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_data_rows() {
        let table = RawTable::from_strs(&[
            &[Some("Domain"), Some("Score"), Some("Severity"), None],
            &[Some("Anxiety"), Some("12"), Some("Moderate"), Some("x")],
        ]);
        assert_eq!(table.header().len(), 4);
        assert_eq!(table.data_rows().len(), 1);
        assert!(table.header_starts_with(&["Domain", "Score", "Severity"]));
        assert!(!table.header_starts_with(&["Domain", "Severity"]));
        assert_eq!(table.truncated(3).data_rows()[0].len(), 3);
    }

    #[test]
    fn empty_table_has_no_header() {
        let table = RawTable::default();
        assert!(table.header().is_empty());
        assert!(table.data_rows().is_empty());
        assert!(!table.header_starts_with(&["Domain"]));
    }

    #[test]
    fn deserializes_null_cells() {
        let doc: SourceDocument =
            serde_json::from_str(r#"{"tables": [[["A", null]]], "pages": ["p1", "p2"]}"#)
                .expect("parse document");
        assert_eq!(doc.tables[0].header(), &[Some("A".to_string()), None]);
        assert_eq!(doc.full_text(), "p1\np2");
    }
}
