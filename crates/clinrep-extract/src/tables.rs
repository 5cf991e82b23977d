//! Records built from the percentile and severity tables.

use tracing::{debug, warn};

use clinrep_grading::{is_flagged, percentile_grade, severity_flag};
use clinrep_ingest::{
    clean_value, column_names, column_values, find_table, select_renamed, table_at, table_frame,
};
use clinrep_model::{DomainScoreRecord, RawTable, SeverityRecord};

use crate::error::Result;
use crate::options::ExtractionOptions;

pub const DOMAIN_SCORES_COLUMN: &str = "Domain Scores";
pub const PERCENTILE_COLUMN: &str = "Percentile";

/// Header that identifies the severity table.
pub const SEVERITY_HEADER: [&str; 3] = ["Domain", "Score", "Severity"];

/// Builds graded records from the percentile table, located by position.
///
/// Rows whose percentile has no digits are dropped.
pub fn percentile_records(
    tables: &[RawTable],
    options: &ExtractionOptions,
) -> Result<Vec<DomainScoreRecord>> {
    let Some(table) = table_at(tables, options.percentile_table_index) else {
        warn!(
            index = options.percentile_table_index,
            "percentile table not present"
        );
        return Ok(Vec::new());
    };
    let frame = table_frame(table)?;
    let (domain_column, percentile_column) = options.percentile_columns;
    let Some(selected) = select_renamed(
        &frame,
        &[
            (domain_column, DOMAIN_SCORES_COLUMN),
            (percentile_column, PERCENTILE_COLUMN),
        ],
    )?
    else {
        warn!(
            columns = frame.width(),
            "percentile table is narrower than the selected columns"
        );
        return Ok(Vec::new());
    };

    let domains = column_values(&selected, DOMAIN_SCORES_COLUMN)?;
    let percentiles = column_values(&selected, PERCENTILE_COLUMN)?;
    let mut records = Vec::with_capacity(domains.len());
    let mut dropped = 0usize;
    for (domain, raw) in domains.into_iter().zip(percentiles) {
        let Some(percentile) = raw.as_deref().and_then(clean_value) else {
            dropped += 1;
            continue;
        };
        let grade = percentile_grade(percentile);
        records.push(DomainScoreRecord {
            domain: domain.unwrap_or_default().trim().to_string(),
            percentile,
            grade,
            flagged: is_flagged(grade),
        });
    }
    debug!(records = records.len(), dropped, "percentile records built");
    Ok(records)
}

/// Builds severity records from the first table headed `Domain, Score, Severity`.
///
/// Rows are cut to three cells; rows whose score has no digits are dropped.
pub fn severity_records(tables: &[RawTable]) -> Result<Vec<SeverityRecord>> {
    let Some(table) = find_table(tables, |table| table.header_starts_with(&SEVERITY_HEADER))
    else {
        debug!("severity table not present");
        return Ok(Vec::new());
    };
    let frame = table_frame(&table.truncated(SEVERITY_HEADER.len()))?;
    let names = column_names(&frame);
    let [domain_name, score_name, severity_name] = names.as_slice() else {
        return Ok(Vec::new());
    };

    let domains = column_values(&frame, domain_name)?;
    let scores = column_values(&frame, score_name)?;
    let severities = column_values(&frame, severity_name)?;
    let mut records = Vec::with_capacity(domains.len());
    let mut dropped = 0usize;
    for ((domain, raw_score), severity) in domains.into_iter().zip(scores).zip(severities) {
        let Some(score) = raw_score.as_deref().and_then(clean_value) else {
            dropped += 1;
            continue;
        };
        let severity = severity.unwrap_or_default().trim().to_string();
        let flagged = severity_flag(&severity).is_some_and(is_flagged);
        records.push(SeverityRecord {
            domain: domain.unwrap_or_default().trim().to_string(),
            score,
            severity,
            flagged,
        });
    }
    debug!(records = records.len(), dropped, "severity records built");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use clinrep_model::Grade;

    use super::*;

    fn percentile_table() -> RawTable {
        RawTable::from_strs(&[
            &[Some("Domain"), Some("Raw"), Some("T-Score"), Some("Percentile")],
            &[Some("Composite Memory"), Some("96"), Some("98"), Some("45")],
            &[Some("Verbal Memory"), Some("50"), Some("80"), Some("9th")],
            &[Some("Visual Memory"), Some("40"), Some("70"), Some("NA")],
            &[Some("Reaction Time"), Some("600"), Some("112"), Some(">99")],
        ])
    }

    fn severity_table() -> RawTable {
        RawTable::from_strs(&[
            &[Some("Domain"), Some("Score"), Some("Severity"), None],
            &[Some("Attention"), Some("12"), Some("Moderate"), Some("extra")],
            &[Some("Memory"), Some("3"), Some("Not a problem")],
            &[Some("Anxiety"), Some("-"), Some("Severe")],
        ])
    }

    #[test]
    fn percentile_table_by_position() {
        let tables = vec![severity_table(), percentile_table()];
        let records = percentile_records(&tables, &ExtractionOptions::default()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].domain, "Composite Memory");
        assert_eq!(records[0].grade, Grade::Average);
        assert!(!records[0].flagged);
        assert_eq!(records[1].percentile, 9);
        assert_eq!(records[1].grade, Grade::LowAverage);
        assert!(records[1].flagged);
        assert_eq!(records[2].percentile, 99);
        assert_eq!(records[2].grade, Grade::AboveAverage);
    }

    #[test]
    fn narrow_percentile_table_yields_nothing() {
        let narrow = RawTable::from_strs(&[&[Some("Domain"), Some("Score")], &[Some("A"), Some("5")]]);
        let tables = vec![severity_table(), narrow];
        let records = percentile_records(&tables, &ExtractionOptions::default()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn severity_table_by_content() {
        let tables = vec![percentile_table(), percentile_table(), severity_table()];
        let records = severity_records(&tables).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].domain, "Attention");
        assert_eq!(records[0].score, 12);
        assert!(records[0].flagged);
        assert_eq!(records[1].severity, "Not a problem");
        assert!(!records[1].flagged);
    }

    #[test]
    fn missing_severity_table_is_not_an_error() {
        let tables = vec![percentile_table(), percentile_table()];
        assert!(severity_records(&tables).unwrap().is_empty());
    }
}
