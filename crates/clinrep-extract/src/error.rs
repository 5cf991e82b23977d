//! Error types for extraction.

use thiserror::Error;

use clinrep_ingest::IngestError;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// The document does not have the tables the extraction relies on.
    #[error("document has insufficient tabular structure: found {found} table(s), need {required}")]
    InsufficientTables { found: usize, required: usize },

    /// Neither tables nor text patterns produced any record.
    #[error("nothing to export: no tables or known test results were extracted")]
    NothingToExport,

    /// An anchor phrase could not be compiled into a matcher.
    #[error("invalid anchor '{anchor}': {source}")]
    Anchor {
        anchor: String,
        #[source]
        source: regex::Error,
    },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
