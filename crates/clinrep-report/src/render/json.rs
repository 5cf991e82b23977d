use anyhow::{Context, Result};

use clinrep_model::Report;

use super::Renderer;

/// Pretty-printed JSON of the report structure.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(report).context("serialize report")?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
