//! CLI library components for the clinical report converter.

pub mod logging;
pub mod pipeline;
