//! Conversion stages: ingest, extract, assemble, render.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use clinrep_extract::{ExtractionOptions, extract_document};
use clinrep_ingest::SourceAdapter;
use clinrep_model::{Extraction, Report, SourceDocument};
use clinrep_report::{AssemblyOptions, OutputFormat, assemble, renderer_for};

use crate::logging::redact_value;

/// File name the converter writes when no output path is given.
pub const DEFAULT_OUTPUT_STEM: &str = "extracted_table_with_grades";

/// Reads the document from a source adapter.
pub fn ingest<S: SourceAdapter>(source: &S) -> Result<SourceDocument> {
    let span = info_span!("ingest");
    let _guard = span.enter();
    let start = Instant::now();
    let document = source.open().context("read source document")?;
    info!(
        tables = document.tables.len(),
        pages = document.pages.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(document)
}

/// Runs every extractor over the document.
///
/// # Errors
///
/// Extraction errors pass through unchanged so callers can downcast to
/// [`clinrep_extract::ExtractError`].
pub fn extract(document: &SourceDocument, options: &ExtractionOptions) -> Result<Extraction> {
    let extraction = extract_document(document, options)?;
    trace_records(&extraction);
    Ok(extraction)
}

pub fn assemble_report(extraction: Extraction, options: &AssemblyOptions) -> Report {
    let span = info_span!("assemble");
    let _guard = span.enter();
    let start = Instant::now();
    let report = assemble(extraction, options);
    info!(
        items = report.len(),
        flagged = report.flagged_count(),
        duration_ms = start.elapsed().as_millis(),
        "assemble complete"
    );
    report
}

/// Extracts records and assembles the report.
pub fn build_report(
    document: &SourceDocument,
    extraction_options: &ExtractionOptions,
    assembly_options: &AssemblyOptions,
) -> Result<Report> {
    let extraction = extract(document, extraction_options)?;
    Ok(assemble_report(extraction, assembly_options))
}

/// Ingests and assembles in one call.
pub fn convert_document<S: SourceAdapter>(
    source: &S,
    extraction_options: &ExtractionOptions,
    assembly_options: &AssemblyOptions,
) -> Result<Report> {
    let document = ingest(source)?;
    build_report(&document, extraction_options, assembly_options)
}

pub fn render_report(report: &Report, format: OutputFormat) -> Result<Vec<u8>> {
    let span = info_span!("render", format = %format);
    let _guard = span.enter();
    let start = Instant::now();
    let bytes = renderer_for(format)
        .render(report)
        .with_context(|| format!("render {format} report"))?;
    info!(
        bytes = bytes.len(),
        duration_ms = start.elapsed().as_millis(),
        "render complete"
    );
    Ok(bytes)
}

/// `extracted_table_with_grades.<ext>` in the input's directory.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let extension = renderer_for(format).extension();
    let directory = input.parent().unwrap_or_else(|| Path::new(""));
    directory.join(format!("{DEFAULT_OUTPUT_STEM}.{extension}"))
}

fn trace_records(extraction: &Extraction) {
    for record in &extraction.domain_scores {
        trace!(
            domain = redact_value(&record.domain),
            percentile = redact_value(&record.percentile.to_string()),
            flagged = record.flagged,
            "domain score"
        );
    }
    for record in &extraction.severities {
        trace!(
            domain = redact_value(&record.domain),
            severity = redact_value(&record.severity),
            flagged = record.flagged,
            "severity"
        );
    }
    for subtest in &extraction.subtests {
        for metric in subtest.metrics() {
            trace!(
                subtest = %subtest.name,
                metric = %metric.name,
                value = redact_value(&metric.raw_value.to_string()),
                flagged = metric.flagged,
                "subtest metric"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_sits_next_to_input() {
        let path = default_output_path(Path::new("reports/patient.json"), OutputFormat::Docx);
        assert_eq!(path, Path::new("reports/extracted_table_with_grades.docx"));

        let path = default_output_path(Path::new("patient.json"), OutputFormat::Text);
        assert_eq!(path, Path::new("extracted_table_with_grades.txt"));
    }
}
