//! The assembled report handed to renderers.

use serde::{Deserialize, Serialize};

use crate::{DomainScoreRecord, GradedMetric, ScaleScore, SeverityRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// Subtest, scale, or sub-inventory heading.
    Section,
    /// Sub-group inside a subtest.
    Group,
}

/// Structural heading marker. Rendered bold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub text: String,
    pub level: HeadingLevel,
}

impl Heading {
    pub fn section(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: HeadingLevel::Section,
        }
    }

    pub fn group(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: HeadingLevel::Group,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ReportItem {
    Heading(Heading),
    DomainScore(DomainScoreRecord),
    Severity(SeverityRecord),
    Metric(GradedMetric),
    Scale(ScaleScore),
    Line { text: String, flagged: bool },
}

impl ReportItem {
    /// Flag state carried over from grading.
    pub fn is_flagged(&self) -> bool {
        match self {
            ReportItem::DomainScore(record) => record.flagged,
            ReportItem::Severity(record) => record.flagged,
            ReportItem::Metric(metric) => metric.flagged,
            ReportItem::Line { flagged, .. } => *flagged,
            ReportItem::Heading(_) | ReportItem::Scale(_) => false,
        }
    }

    /// Display text without the flag marker.
    pub fn text(&self) -> String {
        match self {
            ReportItem::Heading(heading) => heading.text.clone(),
            ReportItem::DomainScore(record) => {
                format!("{}: {}, {}", record.domain, record.percentile, record.grade)
            }
            ReportItem::Severity(record) => {
                format!("{}: {}, {}", record.domain, record.score, record.severity)
            }
            ReportItem::Metric(metric) => {
                format!("{}: {}, {}", metric.name, metric.raw_value, metric.grade)
            }
            ReportItem::Scale(scale) => format!(
                "{} Total Score: {}, {}",
                scale.scale_name, scale.total, scale.severity_label
            ),
            ReportItem::Line { text, .. } => text.clone(),
        }
    }
}

/// Ordered, read-only report. Built once by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    title: String,
    items: Vec<ReportItem>,
}

impl Report {
    pub fn new(title: impl Into<String>, items: Vec<ReportItem>) -> Self {
        Self {
            title: title.into(),
            items,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[ReportItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn flagged_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_flagged()).count()
    }
}
