//! Data model shared by the clinical report crates.
//!
//! Raw input (tables and page text) flows in from a source adapter, graded
//! records flow out of extraction, and a [`Report`] is the immutable result
//! handed to a renderer.

pub mod extraction;
pub mod grade;
pub mod records;
pub mod report;
pub mod table;

pub use extraction::Extraction;
pub use grade::Grade;
pub use records::{
    DomainScoreRecord, GradedMetric, MetricGroup, ScaleScore, ScaleScores, SeverityRecord,
    SubscaleTotal, SubtestResult, TraumaChecklist,
};
pub use report::{Heading, HeadingLevel, Report, ReportItem};
pub use table::{Cell, RawTable, SourceDocument};
