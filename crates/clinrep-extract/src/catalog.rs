//! Subtest catalog.
//!
//! Each subtest result block in the report text reads: the subtest name,
//! then one row per metric with score, standard score, and percentile.

use crate::anchor::Step;

#[derive(Debug, Clone, Copy)]
pub struct MetricSpec {
    pub name: &'static str,
    pub anchor: &'static str,
}

/// Metrics of a subtest, optionally introduced by their own anchor.
#[derive(Debug, Clone, Copy)]
pub struct GroupSpec {
    pub label: Option<&'static str>,
    pub metrics: &'static [MetricSpec],
}

#[derive(Debug, Clone, Copy)]
pub struct SubtestSpec {
    pub name: &'static str,
    pub anchor: &'static str,
    pub groups: &'static [GroupSpec],
}

impl SubtestSpec {
    /// Flattens the subtest into scan steps: name anchor, then per group an
    /// optional label anchor followed by one metric step per metric.
    pub fn steps(&self) -> Vec<Step> {
        let mut steps = vec![Step::anchor(self.anchor)];
        for group in self.groups {
            if let Some(label) = group.label {
                steps.push(Step::anchor(label));
            }
            steps.extend(group.metrics.iter().map(|metric| Step::metric(metric.anchor)));
        }
        steps
    }

    pub fn metric_count(&self) -> usize {
        self.groups.iter().map(|group| group.metrics.len()).sum()
    }
}

const fn metric(name: &'static str) -> MetricSpec {
    MetricSpec { name, anchor: name }
}

const MEMORY_METRICS: &[GroupSpec] = &[GroupSpec {
    label: None,
    metrics: &[
        metric("Correct Hits - Immediate"),
        metric("Correct Passes - Immediate"),
        metric("Correct Hits - Delay"),
        metric("Correct Passes - Delay"),
    ],
}];

const EMOTION_METRICS: &[MetricSpec] = &[
    metric("Correct Responses"),
    metric("Average Correct Reaction Time"),
];

pub const VERBAL_MEMORY: &str = "Verbal Memory Test";
pub const VISUAL_MEMORY: &str = "Visual Memory Test";
pub const FINGER_TAPPING: &str = "Finger Tapping Test";
pub const SYMBOL_DIGIT_CODING: &str = "Symbol Digit Coding";
pub const STROOP: &str = "Stroop Test";
pub const SHIFTING_ATTENTION: &str = "Shifting Attention Test";
pub const CONTINUOUS_PERFORMANCE: &str = "Continuous Performance Test";
pub const PERCEPTION_OF_EMOTIONS: &str = "Perception of Emotions Test";
pub const NON_VERBAL_REASONING: &str = "Non-Verbal Reasoning Test";
pub const FOUR_PART_CPT: &str = "Four Part Continuous Performance Test";

/// The ten subtests, in report order.
pub const SUBTESTS: &[SubtestSpec] = &[
    SubtestSpec {
        name: VERBAL_MEMORY,
        anchor: VERBAL_MEMORY,
        groups: MEMORY_METRICS,
    },
    SubtestSpec {
        name: VISUAL_MEMORY,
        anchor: VISUAL_MEMORY,
        groups: MEMORY_METRICS,
    },
    SubtestSpec {
        name: FINGER_TAPPING,
        anchor: FINGER_TAPPING,
        groups: &[GroupSpec {
            label: None,
            metrics: &[metric("Right Taps Average"), metric("Left Taps Average")],
        }],
    },
    SubtestSpec {
        name: SYMBOL_DIGIT_CODING,
        anchor: SYMBOL_DIGIT_CODING,
        groups: &[GroupSpec {
            label: None,
            metrics: &[metric("Correct Responses"), metric("Errors")],
        }],
    },
    SubtestSpec {
        name: STROOP,
        anchor: STROOP,
        groups: &[GroupSpec {
            label: None,
            metrics: &[
                metric("Simple Reaction Time"),
                metric("Complex Reaction Time Correct"),
                metric("Stroop Reaction Time Correct"),
                metric("Stroop Commission Errors"),
            ],
        }],
    },
    SubtestSpec {
        name: SHIFTING_ATTENTION,
        anchor: SHIFTING_ATTENTION,
        groups: &[GroupSpec {
            label: None,
            metrics: &[
                metric("Correct Responses"),
                metric("Errors"),
                metric("Correct Reaction Time"),
            ],
        }],
    },
    SubtestSpec {
        name: CONTINUOUS_PERFORMANCE,
        anchor: CONTINUOUS_PERFORMANCE,
        groups: &[GroupSpec {
            label: None,
            metrics: &[
                metric("Correct Responses"),
                metric("Omission Errors"),
                metric("Commission Errors"),
                metric("Choice Reaction Time Correct"),
            ],
        }],
    },
    SubtestSpec {
        name: PERCEPTION_OF_EMOTIONS,
        anchor: PERCEPTION_OF_EMOTIONS,
        groups: &[
            GroupSpec {
                label: Some("Positive Emotions"),
                metrics: EMOTION_METRICS,
            },
            GroupSpec {
                label: Some("Negative Emotions"),
                metrics: EMOTION_METRICS,
            },
        ],
    },
    SubtestSpec {
        name: NON_VERBAL_REASONING,
        anchor: NON_VERBAL_REASONING,
        groups: &[GroupSpec {
            label: None,
            metrics: &[metric("Correct Responses"), metric("Commission Errors")],
        }],
    },
    SubtestSpec {
        name: FOUR_PART_CPT,
        anchor: FOUR_PART_CPT,
        groups: &[GroupSpec {
            label: None,
            metrics: &[
                metric("Part 2 Average Correct Reaction Time"),
                metric("Part 3 Average Correct Reaction Time"),
                metric("Part 4 Average Correct Reaction Time"),
                metric("Part 4 Incorrect Responses"),
            ],
        }],
    },
];

/// Looks a subtest up by its display name.
pub fn subtest(name: &str) -> Option<&'static SubtestSpec> {
    SUBTESTS.iter().find(|spec| spec.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn catalog_has_ten_unique_subtests() {
        assert_eq!(SUBTESTS.len(), 10);
        let names: BTreeSet<&str> = SUBTESTS.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), 10);
    }

    #[test]
    fn emotion_subtest_has_two_groups_of_two() {
        let spec = subtest(PERCEPTION_OF_EMOTIONS).expect("emotion subtest");
        assert_eq!(spec.groups.len(), 2);
        assert!(spec.groups.iter().all(|group| group.metrics.len() == 2));
        // name + 2 group labels + 4 metrics
        assert_eq!(spec.steps().len(), 7);
        assert_eq!(spec.metric_count(), 4);
    }

    #[test]
    fn verbal_memory_steps() {
        let spec = subtest(VERBAL_MEMORY).expect("verbal memory");
        let steps = spec.steps();
        assert_eq!(steps[0], Step::anchor("Verbal Memory Test"));
        assert_eq!(steps[1], Step::metric("Correct Hits - Immediate"));
        assert_eq!(steps.len(), 5);
    }
}
