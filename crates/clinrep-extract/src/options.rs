/// Options for table-based extraction.
#[derive(Debug, Clone)]
pub struct ExtractionOptions {
    /// Position of the percentile table in source order.
    pub percentile_table_index: usize,
    /// Positions of the domain and percentile columns in that table.
    pub percentile_columns: (usize, usize),
}

impl ExtractionOptions {
    /// Minimum number of tables a document must carry.
    pub fn required_tables(&self) -> usize {
        (self.percentile_table_index + 1).max(2)
    }
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            percentile_table_index: 1,
            percentile_columns: (0, 3),
        }
    }
}
