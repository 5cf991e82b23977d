//! Integration tests for whole-document extraction.

use clinrep_extract::{ExtractError, ExtractionOptions, extract_document};
use clinrep_model::{Grade, RawTable, SourceDocument};

fn severity_table() -> RawTable {
    RawTable::from_strs(&[
        &[Some("Domain"), Some("Score"), Some("Severity")],
        &[Some("Attention"), Some("14"), Some("Moderate")],
        &[Some("Memory"), Some("2"), Some("Not a problem")],
    ])
}

fn percentile_table() -> RawTable {
    RawTable::from_strs(&[
        &[Some("Domain"), Some("Raw"), Some("T-Score"), Some("Percentile")],
        &[Some("Composite Memory"), Some("96"), Some("98"), Some("45")],
        &[Some("Psychomotor Speed"), Some("150"), Some("88"), Some("21")],
        &[Some("Reaction Time"), Some("700"), Some("80"), Some("1")],
    ])
}

const VERBAL_MEMORY_BLOCK: &str = "Verbal Memory Test\n\
    Score Standard Percentile\n\
    Correct Hits - Immediate 14 102 55\n\
    Correct Passes - Immediate 13 101 55\n\
    Correct Hits - Delay 12 100 55\n\
    Correct Passes - Delay 14 103 55\n";

#[test]
fn two_table_document_with_verbal_memory() {
    let document = SourceDocument {
        tables: vec![severity_table(), percentile_table()],
        pages: vec!["CNS Vital Signs report".to_string(), VERBAL_MEMORY_BLOCK.to_string()],
    };
    let extraction = extract_document(&document, &ExtractionOptions::default()).unwrap();

    let grades: Vec<Grade> = extraction.domain_scores.iter().map(|r| r.grade).collect();
    assert_eq!(grades, vec![Grade::Average, Grade::LowAverage, Grade::VeryLow]);

    assert_eq!(extraction.severities.len(), 2);
    assert_eq!(
        extraction.severities.iter().filter(|r| r.flagged).count(),
        1
    );

    assert_eq!(extraction.subtests.len(), 1);
    let verbal = &extraction.subtests[0];
    assert_eq!(verbal.name, "Verbal Memory Test");
    assert_eq!(verbal.metrics().count(), 4);
    assert!(verbal.metrics().all(|m| m.raw_value == 55 && m.grade == Grade::Average));
}

#[test]
fn fewer_than_two_tables_halts() {
    let document = SourceDocument {
        tables: vec![percentile_table()],
        pages: vec![VERBAL_MEMORY_BLOCK.to_string()],
    };
    let err = extract_document(&document, &ExtractionOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::InsufficientTables {
            found: 1,
            required: 2
        }
    ));
}

#[test]
fn nothing_extracted_is_reported() {
    let empty = RawTable::from_strs(&[&[Some("Header")]]);
    let document = SourceDocument {
        tables: vec![empty.clone(), empty],
        pages: vec!["No results on this page.".to_string()],
    };
    let err = extract_document(&document, &ExtractionOptions::default()).unwrap_err();
    assert!(matches!(err, ExtractError::NothingToExport));
}

#[test]
fn flags_follow_grades() {
    let document = SourceDocument {
        tables: vec![severity_table(), percentile_table()],
        pages: vec![VERBAL_MEMORY_BLOCK.to_string()],
    };
    let extraction = extract_document(&document, &ExtractionOptions::default()).unwrap();
    for record in &extraction.domain_scores {
        let expected = matches!(
            record.grade,
            Grade::LowAverage | Grade::Low | Grade::VeryLow | Grade::Flag
        );
        assert_eq!(record.flagged, expected, "{}", record.domain);
    }
}
