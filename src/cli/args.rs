// ABOUTME: Command line argument definitions and parsing using Clap
// ABOUTME: Defines the main CLI structure and subcommands for mergeflow

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::tags::OutputFormat;

#[derive(Parser)]
#[command(name = "mergeflow")]
#[command(about = "Resolve workflow merge tags in notification templates")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Path to configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Text,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Html => OutputFormat::Html,
            FormatArg::Text => OutputFormat::Text,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve merge tags in a template against a fixture
    Render {
        #[arg(help = "Path to the template file")]
        template: PathBuf,

        #[arg(short, long, help = "Path to fixture YAML file")]
        fixture: PathBuf,

        #[arg(short, long, help = "Write the rendered text to this file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Override the entry's current workflow step")]
        step: Option<u64>,

        #[arg(
            short = 'F',
            long = "field",
            help = "Override entry field values (key=value)"
        )]
        fields: Vec<String>,

        #[arg(long, value_enum, default_value = "html", help = "Output format")]
        format: FormatArg,

        #[arg(long, help = "Ask step handlers to escape HTML")]
        esc_html: bool,

        #[arg(long, help = "Ask step handlers to convert newlines to <br>")]
        nl2br: bool,

        #[arg(long, help = "Ask step handlers to URL-encode values")]
        url_encode: bool,
    },

    /// Validate a fixture file without rendering
    Validate {
        #[arg(short, long, help = "Path to fixture YAML file")]
        fixture: PathBuf,

        #[arg(long, help = "Treat warnings as errors")]
        strict: bool,
    },

    /// List the supported merge tags
    Tags,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse fields from key=value format
    pub fn parse_fields(
        fields: &[String],
    ) -> anyhow::Result<indexmap::IndexMap<String, String>> {
        let mut parsed = indexmap::IndexMap::new();

        for field in fields {
            if let Some((key, value)) = field.split_once('=') {
                parsed.insert(key.to_string(), value.to_string());
            } else {
                return Err(anyhow::anyhow!(
                    "Invalid field format '{}'. Expected 'key=value'",
                    field
                ));
            }
        }

        Ok(parsed)
    }
}
