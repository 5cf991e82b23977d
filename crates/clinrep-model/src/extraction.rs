use serde::{Deserialize, Serialize};

use crate::{DomainScoreRecord, ScaleScores, SeverityRecord, SubtestResult};

/// Everything extracted from one document, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub domain_scores: Vec<DomainScoreRecord>,
    pub severities: Vec<SeverityRecord>,
    pub subtests: Vec<SubtestResult>,
    pub scales: ScaleScores,
}

impl Extraction {
    /// True when no table or pattern extraction produced anything.
    pub fn is_empty(&self) -> bool {
        self.domain_scores.is_empty()
            && self.severities.is_empty()
            && self.subtests.is_empty()
            && self.scales.is_empty()
    }
}
