use std::path::PathBuf;

use clinrep_model::Report;
use clinrep_report::OutputFormat;

#[derive(Debug)]
pub struct ConvertResult {
    pub input: PathBuf,
    /// None on a dry run.
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub report: Report,
    pub counts: SectionCounts,
}

/// Record counts per extractor.
#[derive(Debug, Default)]
pub struct SectionCounts {
    pub domain_scores: Count,
    pub severities: Count,
    pub subtests: usize,
    pub subtest_metrics: Count,
    pub scales: usize,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Count {
    pub total: usize,
    pub flagged: usize,
}

impl Count {
    pub fn add(&mut self, flagged: bool) {
        self.total += 1;
        if flagged {
            self.flagged += 1;
        }
    }
}
