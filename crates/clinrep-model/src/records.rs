//! Graded records produced by extraction.

use serde::{Deserialize, Serialize};

use crate::Grade;

/// Row of the percentile domain table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainScoreRecord {
    pub domain: String,
    pub percentile: u32,
    pub grade: Grade,
    pub flagged: bool,
}

/// Row of the domain/score/severity table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityRecord {
    pub domain: String,
    pub score: u32,
    pub severity: String,
    pub flagged: bool,
}

/// One captured subtest metric with its percentile grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradedMetric {
    pub name: String,
    pub raw_value: u32,
    pub grade: Grade,
    pub flagged: bool,
}

/// Metrics of a subtest, optionally under a named sub-group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub label: Option<String>,
    pub metrics: Vec<GradedMetric>,
}

/// A fully matched subtest. Partial matches never produce one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtestResult {
    pub name: String,
    pub groups: Vec<MetricGroup>,
}

impl SubtestResult {
    pub fn metrics(&self) -> impl Iterator<Item = &GradedMetric> {
        self.groups.iter().flat_map(|group| group.metrics.iter())
    }

    /// Looks a metric up by name, optionally within a group label.
    pub fn metric(&self, group: Option<&str>, name: &str) -> Option<&GradedMetric> {
        self.groups
            .iter()
            .filter(|candidate| group.is_none() || candidate.label.as_deref() == group)
            .flat_map(|candidate| candidate.metrics.iter())
            .find(|metric| metric.name == name)
    }
}

/// Questionnaire total with its severity band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleScore {
    pub scale_name: String,
    pub total: u32,
    pub severity_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscaleTotal {
    pub label: String,
    pub total: u32,
}

/// Trauma checklist cluster totals. Not graded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaChecklist {
    pub scale_name: String,
    pub subscales: Vec<SubscaleTotal>,
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleScores {
    pub depression: Option<ScaleScore>,
    pub anxiety: Option<ScaleScore>,
    pub trauma: Option<TraumaChecklist>,
}

impl ScaleScores {
    pub fn is_empty(&self) -> bool {
        self.depression.is_none() && self.anxiety.is_none() && self.trauma.is_none()
    }

    pub fn found_count(&self) -> usize {
        usize::from(self.depression.is_some())
            + usize::from(self.anxiety.is_some())
            + usize::from(self.trauma.is_some())
    }
}
