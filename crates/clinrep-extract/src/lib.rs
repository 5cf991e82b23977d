//! Extraction of graded records from a clinical test report.
//!
//! The entry point is [`extract_document`], which runs the table record
//! builders, the subtest extractor, and the scale extractors over one
//! [`SourceDocument`] and returns a single [`Extraction`].

pub mod anchor;
pub mod catalog;
pub mod error;
pub mod options;
pub mod scales;
pub mod subtests;
pub mod tables;

use std::time::Instant;

use tracing::{info, info_span};

use clinrep_model::{Extraction, SourceDocument};

pub use anchor::{AnchorPattern, Step};
pub use catalog::{SUBTESTS, SubtestSpec};
pub use error::{ExtractError, Result};
pub use options::ExtractionOptions;
pub use scales::ScaleExtractor;
pub use subtests::SubtestExtractor;
pub use tables::{percentile_records, severity_records};

/// Runs every extractor over the document.
///
/// # Errors
///
/// - [`ExtractError::InsufficientTables`] before anything is built when the
///   document has fewer tables than required.
/// - [`ExtractError::NothingToExport`] when no extractor produced a record.
pub fn extract_document(
    document: &SourceDocument,
    options: &ExtractionOptions,
) -> Result<Extraction> {
    let span = info_span!("extract", tables = document.tables.len(), pages = document.pages.len());
    let _guard = span.enter();
    let start = Instant::now();

    let required = options.required_tables();
    if document.tables.len() < required {
        return Err(ExtractError::InsufficientTables {
            found: document.tables.len(),
            required,
        });
    }

    let domain_scores = percentile_records(&document.tables, options)?;
    let severities = severity_records(&document.tables)?;
    let text = document.full_text();
    let subtests = SubtestExtractor::new()?.extract(&text);
    let scales = ScaleExtractor::new()?.extract(&text, &document.tables);

    let extraction = Extraction {
        domain_scores,
        severities,
        subtests,
        scales,
    };
    if extraction.is_empty() {
        return Err(ExtractError::NothingToExport);
    }
    info!(
        domain_scores = extraction.domain_scores.len(),
        severities = extraction.severities.len(),
        subtests = extraction.subtests.len(),
        scales = extraction.scales.found_count(),
        duration_ms = start.elapsed().as_millis(),
        "extraction complete"
    );
    Ok(extraction)
}
