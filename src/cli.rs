use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::pipeline::ExtractConfig;

#[derive(Parser, Debug)]
#[command(
    name = "tocsea-extract",
    version,
    about = "Turns free-text planting advice into structured vegetation tables and advice bullets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract items and advice sections from a provider payload.
    Extract(ExtractArgs),
    /// Split a SECTION-headed detailed response into bullet lists.
    Sections(SectionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// JSON payload file, or `-` for stdin.
    #[arg(long)]
    pub payload: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SectionsArgs {
    /// Raw detailed response text, or `-` for stdin.
    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub tuning: TuningArgs,
}

#[derive(Args, Debug, Clone)]
pub struct TuningArgs {
    /// Lines longer than this are treated as narrative paragraphs.
    #[arg(long, default_value_t = 120)]
    pub max_noise_line_chars: usize,

    #[arg(long, default_value_t = 6)]
    pub min_bullet_chars: usize,

    #[arg(long, default_value_t = 220)]
    pub max_bullet_chars: usize,
}

impl TuningArgs {
    pub fn to_config(&self) -> ExtractConfig {
        ExtractConfig {
            max_noise_line_chars: self.max_noise_line_chars,
            min_bullet_chars: self.min_bullet_chars,
            max_bullet_chars: self.max_bullet_chars,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Html,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Html => "html",
        }
    }
}
