//! Subtest extraction over the full report text.

use regex::Regex;
use tracing::{debug, trace};

use clinrep_grading::{is_flagged, percentile_grade};
use clinrep_model::{GradedMetric, MetricGroup, SubtestResult};

use crate::anchor::{AnchorPattern, anchor_matcher, region_end};
use crate::catalog::{SUBTESTS, SubtestSpec};
use crate::error::Result;

struct CompiledSubtest {
    spec: &'static SubtestSpec,
    header: Regex,
    pattern: AnchorPattern,
}

/// Extracts catalog subtests from report text.
///
/// A subtest is scanned from each occurrence of its name until one scan
/// succeeds. Each scan is bounded by the next occurrence of another
/// subtest's name, so metric labels shared between subtests cannot be taken
/// from the wrong block.
pub struct SubtestExtractor {
    subtests: Vec<CompiledSubtest>,
}

impl SubtestExtractor {
    /// Compiles the built-in catalog.
    pub fn new() -> Result<Self> {
        Self::with_catalog(SUBTESTS)
    }

    pub fn with_catalog(catalog: &'static [SubtestSpec]) -> Result<Self> {
        let subtests = catalog
            .iter()
            .map(|spec| {
                Ok(CompiledSubtest {
                    spec,
                    header: anchor_matcher(spec.anchor)?,
                    pattern: AnchorPattern::compile(&spec.steps())?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { subtests })
    }

    /// Returns one result per fully matched subtest, in catalog order.
    pub fn extract(&self, text: &str) -> Vec<SubtestResult> {
        let mut results = Vec::new();
        for (index, subtest) in self.subtests.iter().enumerate() {
            match self.extract_one(index, text) {
                Some(result) => {
                    debug!(subtest = subtest.spec.name, "subtest matched");
                    results.push(result);
                }
                None => trace!(subtest = subtest.spec.name, "subtest not found"),
            }
        }
        results
    }

    fn extract_one(&self, index: usize, text: &str) -> Option<SubtestResult> {
        let subtest = &self.subtests[index];
        for header in subtest.header.find_iter(text) {
            let bound = self.region_end(index, text, header.end());
            let Some(values) = subtest.pattern.scan_from(&text[..bound], header.start()) else {
                continue;
            };
            return Some(build_result(subtest.spec, &values));
        }
        None
    }

    /// Start of the nearest other subtest name after `from`, or the end of text.
    fn region_end(&self, index: usize, text: &str, from: usize) -> usize {
        let others = self
            .subtests
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, other)| &other.header);
        region_end(others, text, from)
    }
}

fn build_result(spec: &SubtestSpec, values: &[u32]) -> SubtestResult {
    let mut values = values.iter().copied();
    let groups = spec
        .groups
        .iter()
        .map(|group| MetricGroup {
            label: group.label.map(str::to_string),
            metrics: group
                .metrics
                .iter()
                .zip(values.by_ref())
                .map(|(metric, raw_value)| {
                    let grade = percentile_grade(raw_value);
                    GradedMetric {
                        name: metric.name.to_string(),
                        raw_value,
                        grade,
                        flagged: is_flagged(grade),
                    }
                })
                .collect(),
        })
        .collect();
    SubtestResult {
        name: spec.name.to_string(),
        groups,
    }
}

#[cfg(test)]
mod tests {
    use clinrep_model::Grade;

    use super::*;

    fn verbal_block(percentile: u32) -> String {
        format!(
            "Verbal Memory Test\n\
             Score Standard Percentile\n\
             Correct Hits - Immediate 14 102 {percentile}\n\
             Correct Passes - Immediate 13 101 {percentile}\n\
             Correct Hits - Delay 12 100 {percentile}\n\
             Correct Passes - Delay 14 103 {percentile}\n"
        )
    }

    #[test]
    fn extracts_complete_block() {
        let extractor = SubtestExtractor::new().unwrap();
        let results = extractor.extract(&verbal_block(55));
        assert_eq!(results.len(), 1);
        let verbal = &results[0];
        assert_eq!(verbal.name, "Verbal Memory Test");
        assert_eq!(verbal.metrics().count(), 4);
        assert!(
            verbal
                .metrics()
                .all(|m| m.raw_value == 55 && m.grade == Grade::Average && !m.flagged)
        );
    }

    #[test]
    fn partial_block_contributes_nothing() {
        let extractor = SubtestExtractor::new().unwrap();
        let text = "Verbal Memory Test\n\
                    Correct Hits - Immediate 14 102 55\n\
                    Correct Passes - Immediate 13 101 55\n\
                    Correct Hits - Delay 12 100 55\n";
        assert!(extractor.extract(text).is_empty());
    }

    #[test]
    fn does_not_borrow_metrics_from_next_subtest() {
        let extractor = SubtestExtractor::new().unwrap();
        let text = "Verbal Memory Test\n\
                    Correct Hits - Immediate 14 102 55\n\
                    Correct Passes - Immediate 13 101 55\n\
                    Correct Hits - Delay 12 100 55\n\
                    Visual Memory Test\n\
                    Correct Hits - Immediate 14 102 5\n\
                    Correct Passes - Immediate 13 101 5\n\
                    Correct Hits - Delay 12 100 5\n\
                    Correct Passes - Delay 14 103 5\n";
        let results = extractor.extract(text);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Visual Memory Test");
        assert!(results[0].metrics().all(|m| m.grade == Grade::Low && m.flagged));
    }

    #[test]
    fn retries_later_occurrence_of_subtest_name() {
        let extractor = SubtestExtractor::new().unwrap();
        let text = format!("Summary: Verbal Memory Test, Visual Memory Test\n{}", verbal_block(80));
        let results = extractor.extract(&text);
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0]
                .metric(None, "Correct Passes - Delay")
                .map(|m| m.grade),
            Some(Grade::AboveAverage)
        );
    }

    #[test]
    fn emotion_groups_are_nested() {
        let extractor = SubtestExtractor::new().unwrap();
        let text = "Perception of Emotions Test\n\
                    Positive Emotions\n\
                    Correct Responses 10 95 37\n\
                    Average Correct Reaction Time 900 90 25\n\
                    Negative Emotions\n\
                    Correct Responses 8 80 9\n\
                    Average Correct Reaction Time 1100 70 2\n";
        let results = extractor.extract(text);
        assert_eq!(results.len(), 1);
        let emotions = &results[0];
        assert_eq!(emotions.groups.len(), 2);
        assert_eq!(emotions.groups[0].label.as_deref(), Some("Positive Emotions"));
        let negative = emotions
            .metric(Some("Negative Emotions"), "Correct Responses")
            .unwrap();
        assert_eq!(negative.raw_value, 9);
        assert_eq!(negative.grade, Grade::LowAverage);
        assert!(negative.flagged);
        let positive = emotions
            .metric(Some("Positive Emotions"), "Average Correct Reaction Time")
            .unwrap();
        assert_eq!(positive.grade, Grade::Average);
    }

    #[test]
    fn emotion_group_missing_metric_drops_subtest() {
        let extractor = SubtestExtractor::new().unwrap();
        let text = "Perception of Emotions Test\n\
                    Positive Emotions\n\
                    Correct Responses 10 95 37\n\
                    Average Correct Reaction Time 900 90 25\n\
                    Negative Emotions\n\
                    Correct Responses 8 80 9\n";
        assert!(extractor.extract(text).is_empty());
    }

    #[test]
    fn four_part_cpt_does_not_shadow_cpt() {
        let extractor = SubtestExtractor::new().unwrap();
        let text = "Continuous Performance Test\n\
                    Correct Responses 40 100 50\n\
                    Omission Errors 0 105 60\n\
                    Commission Errors 1 100 50\n\
                    Choice Reaction Time Correct 400 98 45\n\
                    Four Part Continuous Performance Test\n\
                    Part 2 Average Correct Reaction Time 500 90 25\n\
                    Part 3 Average Correct Reaction Time 600 85 16\n\
                    Part 4 Average Correct Reaction Time 700 80 9\n\
                    Part 4 Incorrect Responses 3 75 5\n";
        let names: Vec<String> = extractor
            .extract(text)
            .into_iter()
            .map(|result| result.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "Continuous Performance Test",
                "Four Part Continuous Performance Test"
            ]
        );
    }
}
