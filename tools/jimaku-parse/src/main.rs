//! Jimaku command-line parser
//!
//! Parses release titles given as arguments, or one per stdin line, and
//! prints one result per title as JSON lines or plain text.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use jimaku_core::{JimakuError, ParseResult, parse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON object per line
    Json,
    /// Human-readable block per title
    Text,
}

/// CLI arguments
#[derive(Parser)]
#[command(name = "jimaku-parse")]
#[command(about = "Extract subtitle metadata from fansub release titles")]
#[command(version)]
struct Cli {
    /// Titles to parse (reads stdin lines when omitted)
    titles: Vec<String>,

    /// Output format
    #[arg(short, long, env = "JIMAKU_FORMAT", value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Indent JSON output
    #[arg(long)]
    pretty: bool,

    /// Log extraction decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Canonical renderings of one parsed title.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseOutput {
    pub input: String,
    pub episode_range: String,
    pub subtitle_languages: String,
    pub resolution: String,
    pub subtitle_kind: Option<String>,
}

impl ParseOutput {
    fn new(input: &str, result: &ParseResult) -> Self {
        Self {
            input: input.to_string(),
            episode_range: result.episode_range_string(),
            subtitle_languages: result.languages_string(),
            resolution: result.resolution_string(),
            subtitle_kind: result.subtitle_kind.map(|kind| kind.to_string()),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render(output: &ParseOutput, format: Format, pretty: bool) -> Result<String> {
    match format {
        Format::Json if pretty => {
            serde_json::to_string_pretty(output).context("Failed to serialize result")
        }
        Format::Json => serde_json::to_string(output).context("Failed to serialize result"),
        Format::Text => Ok(format!(
            "{}\n  episode:    {}\n  languages:  {}\n  resolution: {}\n  kind:       {}",
            output.input,
            output.episode_range,
            output.subtitle_languages,
            output.resolution,
            output.subtitle_kind.as_deref().unwrap_or("-"),
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let titles: Vec<String> = if cli.titles.is_empty() {
        debug!("Reading titles from stdin");
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("Failed to read titles from stdin")?
    } else {
        cli.titles
    };

    let titles: Vec<&str> = titles
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    if titles.is_empty() {
        return Err(JimakuError::EmptyInput.into());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for title in &titles {
        let result = parse(title);
        let output = ParseOutput::new(title, &result);
        writeln!(out, "{}", render(&output, cli.format, cli.pretty)?)
            .context("Failed to write result")?;
    }

    info!(count = titles.len(), "Parsed titles");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from(["jimaku-parse", "--format", "text", "--pretty", "-v", "a", "b"])
            .unwrap();
        assert_eq!(cli.format, Format::Text);
        assert!(cli.pretty);
        assert!(cli.verbose);
        assert_eq!(cli.titles, vec!["a", "b"]);
    }

    #[test]
    fn json_output_uses_canonical_strings() {
        let title = "[NC-Raws] 间谍过家家 / SPY×FAMILY - 25 (B-Global 3840x2160 HEVC AAC MKV)";
        let output = ParseOutput::new(title, &parse(title));
        let json = render(&output, Format::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["episode_range"], "25..25");
        assert_eq!(value["subtitle_languages"], "");
        assert_eq!(value["resolution"], "4K");
        assert!(value["subtitle_kind"].is_null());
    }

    #[test]
    fn text_output_marks_missing_kind() {
        let title = "[Lilith-Raws] 怪人的沙拉碗 / Henjin no Salad Bowl - 10 [Baha][WebDL 1080p AVC AAC][CHT]";
        let output = ParseOutput::new(title, &parse(title));
        let text = render(&output, Format::Text, false).unwrap();
        assert!(text.contains("episode:    10..10"));
        assert!(text.contains("kind:       -"));
    }
}
