//! Questionnaire scale totals.
//!
//! Each scale is found independently. A scale that is not in the document
//! is reported as `None`, never as an error. A scan starts at an occurrence
//! of the scale's name and stops at the next mention of another scale, so a
//! total is never taken from a neighbouring questionnaire.

use regex::Regex;
use tracing::{debug, trace};

use clinrep_grading::{DepressionVariant, anxiety_severity, depression_severity};
use clinrep_ingest::clean_value;
use clinrep_model::{RawTable, ScaleScore, ScaleScores, SubscaleTotal, TraumaChecklist};

use crate::anchor::{AnchorPattern, Step, anchor_matcher, region_end};
use crate::error::Result;

pub const DEPRESSION_SCALE: &str = "PHQ-9";
pub const ANXIETY_SCALE: &str = "GAD-7";
pub const TRAUMA_SCALE: &str = "PCL-5";

const DEPRESSION_STEPS: &[Step] = &[Step::anchor(DEPRESSION_SCALE), Step::value("Total Score")];
const ANXIETY_STEPS: &[Step] = &[Step::anchor(ANXIETY_SCALE), Step::value("Total Score")];

/// Trauma checklist clusters: (label, anchor).
pub const TRAUMA_CLUSTERS: [(&str, &str); 4] = [
    ("Intrusion (Cluster B)", "Intrusion"),
    ("Avoidance (Cluster C)", "Avoidance"),
    (
        "Negative Alterations in Cognition and Mood (Cluster D)",
        "Negative Alterations in Cognition and Mood",
    ),
    (
        "Alterations in Arousal and Reactivity (Cluster E)",
        "Alterations in Arousal and Reactivity",
    ),
];

const TRAUMA_STEPS: &[Step] = &[
    Step::anchor(TRAUMA_SCALE),
    Step::value(TRAUMA_CLUSTERS[0].1),
    Step::value(TRAUMA_CLUSTERS[1].1),
    Step::value(TRAUMA_CLUSTERS[2].1),
    Step::value(TRAUMA_CLUSTERS[3].1),
    Step::value("Total Score"),
];

/// One scale's name matcher and full step pattern.
struct ScaleScan {
    name: &'static str,
    header: Regex,
    pattern: AnchorPattern,
}

impl ScaleScan {
    fn compile(name: &'static str, steps: &[Step]) -> Result<Self> {
        Ok(Self {
            name,
            header: anchor_matcher(name)?,
            pattern: AnchorPattern::compile(steps)?,
        })
    }
}

/// Compiled scale patterns.
pub struct ScaleExtractor {
    depression: ScaleScan,
    anxiety: ScaleScan,
    trauma: ScaleScan,
}

impl ScaleExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            depression: ScaleScan::compile(DEPRESSION_SCALE, DEPRESSION_STEPS)?,
            anxiety: ScaleScan::compile(ANXIETY_SCALE, ANXIETY_STEPS)?,
            trauma: ScaleScan::compile(TRAUMA_SCALE, TRAUMA_STEPS)?,
        })
    }

    /// Scans the text for all three scales. A depression total missing from
    /// the text is looked up in the tables instead.
    pub fn extract(&self, text: &str, tables: &[RawTable]) -> ScaleScores {
        let depression = self
            .depression(text)
            .or_else(|| depression_from_tables(tables));
        let scores = ScaleScores {
            depression,
            anxiety: self.anxiety(text),
            trauma: self.trauma(text),
        };
        debug!(found = scores.found_count(), "scale scores extracted");
        scores
    }

    pub fn depression(&self, text: &str) -> Option<ScaleScore> {
        let total = self.single(&self.depression, text)?;
        Some(ScaleScore {
            scale_name: DEPRESSION_SCALE.to_string(),
            total,
            severity_label: depression_severity(total, DepressionVariant::ScaleExtractor)
                .to_string(),
        })
    }

    pub fn anxiety(&self, text: &str) -> Option<ScaleScore> {
        let total = self.single(&self.anxiety, text)?;
        Some(ScaleScore {
            scale_name: ANXIETY_SCALE.to_string(),
            total,
            severity_label: anxiety_severity(total).to_string(),
        })
    }

    /// Cluster totals and the overall total. All five must be present.
    pub fn trauma(&self, text: &str) -> Option<TraumaChecklist> {
        let values = self.scan(&self.trauma, text)?;
        let (&total, clusters) = values.split_last()?;
        Some(TraumaChecklist {
            scale_name: TRAUMA_SCALE.to_string(),
            subscales: TRAUMA_CLUSTERS
                .iter()
                .zip(clusters)
                .map(|((label, _), &value)| SubscaleTotal {
                    label: (*label).to_string(),
                    total: value,
                })
                .collect(),
            total,
        })
    }

    /// Tries each occurrence of the scale's name until one bounded scan
    /// succeeds.
    fn scan(&self, scale: &ScaleScan, text: &str) -> Option<Vec<u32>> {
        let others: Vec<&Regex> = [&self.depression, &self.anxiety, &self.trauma]
            .into_iter()
            .filter(|other| other.name != scale.name)
            .map(|other| &other.header)
            .collect();
        let found = scale.header.find_iter(text).find_map(|header| {
            let bound = region_end(others.iter().copied(), text, header.end());
            scale.pattern.scan_from(&text[..bound], header.start())
        });
        if found.is_none() {
            trace!(scale = scale.name, "scale not found");
        }
        found
    }

    fn single(&self, scale: &ScaleScan, text: &str) -> Option<u32> {
        self.scan(scale, text)?.first().copied()
    }
}


/// Depression total from the first table row labelled with the scale name.
pub fn depression_from_tables(tables: &[RawTable]) -> Option<ScaleScore> {
    let total = tables
        .iter()
        .flat_map(RawTable::rows)
        .find(|row| {
            row.first()
                .and_then(Option::as_deref)
                .is_some_and(|label| label.trim().starts_with(DEPRESSION_SCALE))
        })
        .and_then(|row| row.iter().skip(1).flatten().find_map(|cell| clean_value(cell)))?;
    Some(ScaleScore {
        scale_name: DEPRESSION_SCALE.to_string(),
        total,
        severity_label: depression_severity(total, DepressionVariant::TableGrading).to_string(),
    })
}
