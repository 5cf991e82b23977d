//! Named band tables and the grading functions built on them.

use clinrep_model::Grade;

use crate::bands::{Band, BandTable, classify};

/// Percentile grading. Covers every `u32`.
pub const PERCENTILE_BANDS: BandTable<Grade> = BandTable {
    name: "percentile",
    bands: &[
        Band::new(75, u32::MAX, Grade::AboveAverage),
        Band::new(25, 74, Grade::Average),
        Band::new(9, 24, Grade::LowAverage),
        Band::new(2, 8, Grade::Low),
        Band::new(0, 1, Grade::VeryLow),
    ],
    below_range: Grade::VeryLow,
    above_range: Grade::AboveAverage,
};

const DEPRESSION_BANDS: &[Band<&str>] = &[
    Band::new(1, 4, "Minimal depression"),
    Band::new(5, 9, "Mild depression"),
    Band::new(10, 14, "Moderate depression"),
    Band::new(15, 19, "Moderately severe depression"),
    Band::new(20, 27, "Severe depression"),
];

/// Depression bands as graded from table rows. 0 and >27 are uninterpreted.
pub const DEPRESSION_TABLE_BANDS: BandTable<&str> = BandTable {
    name: "depression-table",
    bands: DEPRESSION_BANDS,
    below_range: "Unknown interpretation",
    above_range: "Unknown interpretation",
};

/// Depression bands as graded by the text scale extractor.
pub const DEPRESSION_SCALE_BANDS: BandTable<&str> = BandTable {
    name: "depression-scale",
    bands: DEPRESSION_BANDS,
    below_range: "Unknown interpretation",
    above_range: "Score out of expected range",
};

pub const ANXIETY_BANDS: BandTable<&str> = BandTable {
    name: "anxiety",
    bands: &[
        Band::new(0, 4, "None-Minimal"),
        Band::new(5, 9, "Mild"),
        Band::new(10, 14, "Moderate"),
        Band::new(15, 21, "Severe"),
    ],
    below_range: "Invalid",
    above_range: "Invalid",
};

/// Severity labels that raise a flag.
pub const FLAGGED_SEVERITIES: [&str; 3] = ["Mild", "Moderate", "Severe"];

/// Which depression call site is grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepressionVariant {
    /// Total read from a table row.
    TableGrading,
    /// Total read from anchored report text.
    ScaleExtractor,
}

impl DepressionVariant {
    pub fn bands(self) -> &'static BandTable<&'static str> {
        match self {
            DepressionVariant::TableGrading => &DEPRESSION_TABLE_BANDS,
            DepressionVariant::ScaleExtractor => &DEPRESSION_SCALE_BANDS,
        }
    }
}

pub fn percentile_grade(percentile: u32) -> Grade {
    classify(percentile, &PERCENTILE_BANDS)
}

/// `Some(Grade::Flag)` for a flagged severity label, otherwise `None`.
pub fn severity_flag(severity: &str) -> Option<Grade> {
    let trimmed = severity.trim();
    FLAGGED_SEVERITIES
        .contains(&trimmed)
        .then_some(Grade::Flag)
}

pub fn depression_severity(total: u32, variant: DepressionVariant) -> &'static str {
    classify(total, variant.bands())
}

pub fn anxiety_severity(total: u32) -> &'static str {
    classify(total, &ANXIETY_BANDS)
}

/// Grades that mark a result for clinical attention.
pub fn is_flagged(grade: Grade) -> bool {
    matches!(
        grade,
        Grade::LowAverage | Grade::Low | Grade::VeryLow | Grade::Flag
    )
}
