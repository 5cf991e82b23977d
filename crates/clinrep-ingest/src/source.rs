//! Source adapters.
//!
//! PDF layout and table geometry are resolved upstream. An adapter hands over
//! the resulting tables and page text in document order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use clinrep_model::{RawTable, SourceDocument};

use crate::error::{IngestError, Result};

/// Yields the raw tables and page text of one document.
pub trait SourceAdapter {
    /// Reads the document. Table and page order must match the source.
    fn open(&self) -> Result<SourceDocument>;
}

/// Reads a layout JSON file: `{"tables": [[[cell, ...], ...], ...], "pages": [...]}`.
#[derive(Debug, Clone)]
pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceAdapter for JsonSource {
    fn open(&self) -> Result<SourceDocument> {
        if !self.path.is_file() {
            return Err(IngestError::FileNotFound {
                path: self.path.clone(),
            });
        }
        let bytes = fs::read(&self.path).map_err(|source| IngestError::FileRead {
            path: self.path.clone(),
            source,
        })?;
        let document: SourceDocument =
            serde_json::from_slice(&bytes).map_err(|source| IngestError::Parse {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %self.path.display(),
            tables = document.tables.len(),
            pages = document.pages.len(),
            "source document loaded"
        );
        Ok(document)
    }
}

/// Document already in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    document: SourceDocument,
}

impl MemorySource {
    pub fn new(tables: Vec<RawTable>, pages: Vec<String>) -> Self {
        Self {
            document: SourceDocument { tables, pages },
        }
    }
}

impl From<SourceDocument> for MemorySource {
    fn from(document: SourceDocument) -> Self {
        Self { document }
    }
}

impl SourceAdapter for MemorySource {
    fn open(&self) -> Result<SourceDocument> {
        Ok(self.document.clone())
    }
}
