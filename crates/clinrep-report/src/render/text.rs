use std::fmt::Write as _;

use anyhow::Result;

use clinrep_model::{HeadingLevel, Report, ReportItem};

use super::Renderer;

/// Plain text, one line per item.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let mut out = String::new();
        writeln!(out, "{}", report.title())?;
        writeln!(out)?;
        for item in report.items() {
            match item {
                ReportItem::Heading(heading) => match heading.level {
                    HeadingLevel::Section => writeln!(out, "## {}", heading.text)?,
                    HeadingLevel::Group => writeln!(out, "### {}", heading.text)?,
                },
                _ if item.is_flagged() => writeln!(out, "- {} | FLAG", item.text())?,
                _ => writeln!(out, "- {}", item.text())?,
            }
        }
        Ok(out.into_bytes())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}
