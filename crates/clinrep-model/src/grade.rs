//! Grade tags attached to graded records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Percentile grade, plus the `FLAG` tag produced by severity grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    AboveAverage,
    Average,
    LowAverage,
    Low,
    VeryLow,
    /// Severity label in the flagged set (Mild, Moderate, Severe).
    Flag,
}

impl Grade {
    /// Returns the label as printed in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::AboveAverage => "Above Average",
            Grade::Average => "Average",
            Grade::LowAverage => "Low Average",
            Grade::Low => "Low",
            Grade::VeryLow => "Very Low",
            Grade::Flag => "FLAG",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
