//! Command-line argument parsing for promfind.

use clap::Parser;

/// Output format for resolved entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One entry text per line.
    #[default]
    Text,
    /// JSON array of entries.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s}. Expected: text or json")),
        }
    }
}

/// Resolve Prometheus template variable queries from the command line.
#[derive(Parser, Debug)]
#[command(name = "promfind")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Variable query, e.g. 'label_values(up, job)' or 'metrics(^cpu_.*)'
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Prometheus base URL
    #[arg(short = 'u', long, value_name = "URL", env = "PROMETHEUS_URL")]
    pub url: String,

    /// Time range: the trailing window in seconds, up to now
    #[arg(short = 'l', long, value_name = "SECONDS", default_value = "3600")]
    pub last: u64,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value = "30")]
    pub timeout: u64,

    /// Output format (text or json)
    #[arg(short = 'o', long, value_name = "FORMAT", default_value = "text")]
    pub output: String,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses the output format from the --output argument.
    pub fn parse_output_format(&self) -> std::result::Result<OutputFormat, String> {
        self.output.parse()
    }
}
