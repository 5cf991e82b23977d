//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use clinrep_report::OutputFormat;

#[derive(Parser)]
#[command(
    name = "clinrep",
    version,
    about = "Convert clinical test reports into graded, flag-annotated documents",
    long_about = "Convert a clinical test report (layout JSON with tables and page text)\n\
                  into a graded report.\n\n\
                  Percentile scores, symptom severities, subtest metrics, and\n\
                  PHQ-9 / GAD-7 / PCL-5 totals are extracted and written as DOCX,\n\
                  JSON, or plain text."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow clinical values in trace logs. They are redacted otherwise.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract, grade, and render one report.
    Convert(ConvertArgs),

    /// Preview the tables found in a report with their normalized headers.
    Tables(TablesArgs),

    /// List the subtests the text extractor recognizes.
    Subtests,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Layout JSON for the report (`tables` and `pages`).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: extracted_table_with_grades.<ext> next to INPUT).
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format to generate.
    #[arg(long = "format", value_enum, default_value = "docx")]
    pub format: OutputFormatArg,

    /// Extract and summarize without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Severity-table domain that starts the symptom sub-inventory.
    #[arg(long = "sub-inventory-domain", value_name = "DOMAIN")]
    pub sub_inventory_domain: Option<String>,

    /// Report title.
    #[arg(long = "title")]
    pub title: Option<String>,
}

#[derive(Parser)]
pub struct TablesArgs {
    /// Layout JSON for the report.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Docx,
    Json,
    Text,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(value: OutputFormatArg) -> Self {
        match value {
            OutputFormatArg::Docx => OutputFormat::Docx,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Text => OutputFormat::Text,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
