use std::fs;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use clinrep_extract::{ExtractionOptions, SUBTESTS};
use clinrep_ingest::{JsonSource, normalize_columns};
use clinrep_model::Extraction;
use clinrep_report::{AssemblyOptions, OutputFormat};

use clinrep_cli::pipeline::{assemble_report, default_output_path, extract, ingest, render_report};

use crate::cli::{ConvertArgs, TablesArgs};
use crate::summary::apply_table_style;
use crate::types::{ConvertResult, SectionCounts};

pub fn run_convert(args: &ConvertArgs) -> Result<ConvertResult> {
    let source = JsonSource::new(&args.input);
    let span = info_span!("convert", input = %source.path().display());
    let _guard = span.enter();
    let format = OutputFormat::from(args.format);

    let mut assembly_options = AssemblyOptions::default();
    if let Some(title) = &args.title {
        assembly_options.title.clone_from(title);
    }
    if let Some(domain) = &args.sub_inventory_domain {
        assembly_options.sub_inventory_sentinel.clone_from(domain);
        assembly_options.sub_inventory_heading = format!("{domain} Symptom Inventory");
    }

    let document = ingest(&source)?;
    let extraction = extract(&document, &ExtractionOptions::default())?;
    let counts = section_counts(&extraction);
    let report = assemble_report(extraction, &assembly_options);

    let output = if args.dry_run {
        info!("dry run, output not written");
        None
    } else {
        let bytes = render_report(&report, format)?;
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(source.path(), format));
        fs::write(&path, &bytes).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), bytes = bytes.len(), "report written");
        Some(path)
    };

    Ok(ConvertResult {
        input: source.path().to_path_buf(),
        output,
        format,
        report,
        counts,
    })
}

/// Prints each table's shape and normalized header. Cell values are not shown.
pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let source = JsonSource::new(&args.input);
    let document = ingest(&source)?;
    let mut table = Table::new();
    table.set_header(vec!["#", "Rows", "Columns"]);
    apply_table_style(&mut table);
    for (index, raw) in document.tables.iter().enumerate() {
        let columns = normalize_columns(raw.header()).join(", ");
        table.add_row(vec![
            index.to_string(),
            raw.data_rows().len().to_string(),
            columns,
        ]);
    }
    println!("{table}");
    println!("Source: {}", source.path().display());
    println!("Pages: {}", document.pages.len());
    Ok(())
}

pub fn run_subtests() {
    let mut table = Table::new();
    table.set_header(vec!["Subtest", "Metrics"]);
    apply_table_style(&mut table);
    for spec in SUBTESTS {
        let metrics: Vec<String> = spec
            .groups
            .iter()
            .flat_map(|group| {
                group.metrics.iter().map(move |metric| match group.label {
                    Some(label) => format!("{label}: {}", metric.name),
                    None => metric.name.to_string(),
                })
            })
            .collect();
        table.add_row(vec![spec.name.to_string(), metrics.join("\n")]);
    }
    println!("{table}");
}

fn section_counts(extraction: &Extraction) -> SectionCounts {
    let mut counts = SectionCounts::default();
    for record in &extraction.domain_scores {
        counts.domain_scores.add(record.flagged);
    }
    for record in &extraction.severities {
        counts.severities.add(record.flagged);
    }
    for metric in extraction.subtests.iter().flat_map(|subtest| subtest.metrics()) {
        counts.subtest_metrics.add(metric.flagged);
    }
    counts.subtests = extraction.subtests.len();
    counts.scales = extraction.scales.found_count();
    counts
}
