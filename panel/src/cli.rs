use clap::Parser;
use std::path::PathBuf;

/// Live theme editing panel driven from the terminal.
///
/// Loads a host options payload, then reads editor commands from stdin and
/// prints every `updateTheme` emission to stdout as one JSON line.
#[derive(Debug, Parser)]
#[command(name = "theme-panel", version, about, long_about = None)]
pub struct Cli {
    /// JSON file with the host options payload
    #[arg(value_name = "OPTIONS_JSON")]
    pub options: PathBuf,

    /// Configuration file (defaults to ./panel.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level override: trace, debug, info, warn, error or off
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}
