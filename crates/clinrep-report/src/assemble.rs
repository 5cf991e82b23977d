//! Report assembly.

use tracing::debug;

use clinrep_model::{Extraction, Heading, Report, ReportItem};

/// Options for report assembly.
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    pub title: String,
    /// Severity-table domain that opens the sub-inventory.
    pub sub_inventory_sentinel: String,
    /// Heading inserted before the sentinel domain.
    pub sub_inventory_heading: String,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            title: "CNSVS Metrics with Percentiles and Grades".to_string(),
            sub_inventory_sentinel: "Concussion".to_string(),
            sub_inventory_heading: "Concussion Symptom Inventory".to_string(),
        }
    }
}

/// Builds the report in fixed order: percentile records, severity records,
/// subtests, then scale blocks. Flags are taken from the records as graded.
pub fn assemble(extraction: Extraction, options: &AssemblyOptions) -> Report {
    let Extraction {
        domain_scores,
        severities,
        subtests,
        scales,
    } = extraction;
    let mut items = Vec::new();

    items.extend(domain_scores.into_iter().map(ReportItem::DomainScore));

    let mut sentinel_seen = false;
    for record in severities {
        if !sentinel_seen && record.domain == options.sub_inventory_sentinel {
            items.push(ReportItem::Heading(Heading::section(
                options.sub_inventory_heading.as_str(),
            )));
            sentinel_seen = true;
        }
        items.push(ReportItem::Severity(record));
    }

    for subtest in subtests {
        items.push(ReportItem::Heading(Heading::section(subtest.name)));
        for group in subtest.groups {
            if let Some(label) = group.label {
                items.push(ReportItem::Heading(Heading::group(label)));
            }
            items.extend(group.metrics.into_iter().map(ReportItem::Metric));
        }
    }

    for scale in [scales.depression, scales.anxiety].into_iter().flatten() {
        items.push(ReportItem::Heading(Heading::section(scale.scale_name.as_str())));
        items.push(ReportItem::Scale(scale));
    }
    if let Some(trauma) = scales.trauma {
        items.push(ReportItem::Heading(Heading::section(trauma.scale_name)));
        for subscale in trauma.subscales {
            items.push(ReportItem::Line {
                text: format!("{}: {}", subscale.label, subscale.total),
                flagged: false,
            });
        }
        items.push(ReportItem::Line {
            text: format!("Total Score: {}", trauma.total),
            flagged: false,
        });
    }

    debug!(items = items.len(), "report assembled");
    Report::new(options.title.as_str(), items)
}

#[cfg(test)]
mod tests {
    use clinrep_model::{
        DomainScoreRecord, Grade, GradedMetric, HeadingLevel, MetricGroup, ScaleScore,
        ScaleScores, SeverityRecord, SubscaleTotal, SubtestResult, TraumaChecklist,
    };

    use super::*;

    fn severity(domain: &str, flagged: bool) -> SeverityRecord {
        SeverityRecord {
            domain: domain.to_string(),
            score: 4,
            severity: if flagged { "Mild" } else { "Not a problem" }.to_string(),
            flagged,
        }
    }

    fn metric(name: &str, grade: Grade, flagged: bool) -> GradedMetric {
        GradedMetric {
            name: name.to_string(),
            raw_value: 30,
            grade,
            flagged,
        }
    }

    #[test]
    fn inserts_sub_inventory_heading_once() {
        let extraction = Extraction {
            severities: vec![
                severity("Attention", true),
                severity("Concussion", false),
                severity("Concussion", true),
            ],
            ..Extraction::default()
        };
        let report = assemble(extraction, &AssemblyOptions::default());
        let texts: Vec<String> = report.items().iter().map(ReportItem::text).collect();
        assert_eq!(
            texts,
            vec![
                "Attention: 4, Mild",
                "Concussion Symptom Inventory",
                "Concussion: 4, Not a problem",
                "Concussion: 4, Mild",
            ]
        );
        assert_eq!(report.flagged_count(), 2);
    }

    #[test]
    fn orders_sections_and_keeps_flags() {
        let extraction = Extraction {
            domain_scores: vec![DomainScoreRecord {
                domain: "Composite Memory".to_string(),
                percentile: 5,
                grade: Grade::Low,
                flagged: true,
            }],
            severities: vec![severity("Attention", false)],
            subtests: vec![SubtestResult {
                name: "Perception of Emotions Test".to_string(),
                groups: vec![
                    MetricGroup {
                        label: Some("Positive Emotions".to_string()),
                        metrics: vec![metric("Correct Responses", Grade::Average, false)],
                    },
                    MetricGroup {
                        label: Some("Negative Emotions".to_string()),
                        metrics: vec![metric("Correct Responses", Grade::Low, true)],
                    },
                ],
            }],
            scales: ScaleScores {
                depression: Some(ScaleScore {
                    scale_name: "PHQ-9".to_string(),
                    total: 12,
                    severity_label: "Moderate depression".to_string(),
                }),
                anxiety: None,
                trauma: Some(TraumaChecklist {
                    scale_name: "PCL-5".to_string(),
                    subscales: vec![SubscaleTotal {
                        label: "Intrusion (Cluster B)".to_string(),
                        total: 8,
                    }],
                    total: 8,
                }),
            },
        };
        let report = assemble(extraction, &AssemblyOptions::default());
        let items = report.items();
        assert!(matches!(items[0], ReportItem::DomainScore(_)));
        assert!(matches!(items[1], ReportItem::Severity(_)));
        assert!(matches!(
            &items[2],
            ReportItem::Heading(heading) if heading.level == HeadingLevel::Section
        ));
        assert!(matches!(
            &items[3],
            ReportItem::Heading(heading) if heading.level == HeadingLevel::Group
        ));
        assert!(items[6].is_flagged());
        assert_eq!(items[7].text(), "PHQ-9");
        assert_eq!(items[8].text(), "PHQ-9 Total Score: 12, Moderate depression");
        assert_eq!(items[9].text(), "PCL-5");
        assert_eq!(items[11].text(), "Total Score: 8");
        assert_eq!(report.len(), 12);
        assert_eq!(report.flagged_count(), 2);
    }
}
