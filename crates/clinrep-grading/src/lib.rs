//! Grading engine for clinical report values.
//!
//! Every grading function is a lookup in a fixed band table through
//! [`classify`]. The tables are clinical constants and are reproduced as
//! given, gaps included.

pub mod bands;
pub mod scales;

pub use bands::{Band, BandTable, classify};
pub use scales::{
    ANXIETY_BANDS, DEPRESSION_SCALE_BANDS, DEPRESSION_TABLE_BANDS, DepressionVariant,
    FLAGGED_SEVERITIES, PERCENTILE_BANDS, anxiety_severity, depression_severity, is_flagged,
    percentile_grade, severity_flag,
};
