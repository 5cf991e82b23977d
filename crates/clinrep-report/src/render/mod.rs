//! Report renderers.

mod docx;
mod json;
mod text;

use std::fmt;
use std::str::FromStr;

use anyhow::{Result, bail};

use clinrep_model::Report;

pub use docx::DocxRenderer;
pub use json::JsonRenderer;
pub use text::TextRenderer;

/// Turns a finished report into a document.
pub trait Renderer {
    /// Renders the report, preserving item order and flag styling.
    fn render(&self, report: &Report) -> Result<Vec<u8>>;

    /// File extension for rendered output, without the dot.
    fn extension(&self) -> &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Docx,
    Json,
    Text,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "docx" | "word" => Ok(OutputFormat::Docx),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => bail!("unsupported output format: {other}"),
        }
    }
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Docx => Box::new(DocxRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Text => Box::new(TextRenderer),
    }
}
