use std::path::PathBuf;

use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about = "SQL injection probing engine with baseline-diff classification", long_about = None)]
pub struct Cli {
    /// Target URL
    #[arg(short = 'u', long)]
    pub url: String,

    /// Payload file path
    #[arg(short = 'p', long, default_value = "payloads.txt")]
    pub payload_file: PathBuf,

    /// Worker pool size for concurrent trials
    #[arg(short = 't', long, default_value_t = 10)]
    pub threads: usize,

    /// CSV log file (default: results_<timestamp>.csv)
    #[arg(short = 'l', long)]
    pub log: Option<PathBuf>,

    /// Probe only this field instead of discovered form fields
    #[arg(short = 'f', long)]
    pub field: Option<String>,

    /// Cookies as k1=v1;k2=v2
    #[arg(short = 'c', long)]
    pub cookies: Option<String>,

    /// File with list of proxies, one per line
    #[arg(long)]
    pub proxy_file: Option<PathBuf>,

    /// Table name wordlist for UNION probing
    #[arg(long)]
    pub table_wordlist: Option<PathBuf>,

    /// Column name wordlist for UNION probing
    #[arg(long)]
    pub column_wordlist: Option<PathBuf>,

    /// Fingerprint the backend engine before testing
    #[arg(long, default_value_t = false)]
    pub db_detect: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub output_format: OutputFormat,

    /// Log every trial, not only vulnerable ones
    #[arg(long, default_value_t = false)]
    pub log_all: bool,

    /// Timing anomaly threshold in seconds
    #[arg(long, default_value_t = 4.0)]
    pub sleep_threshold: f64,

    /// Content-length diff threshold as a fraction of the baseline
    #[arg(long, default_value_t = 0.1)]
    pub content_diff_percent: f64,

    /// Minimum delay between trial submissions in seconds
    #[arg(long, default_value_t = 0.1)]
    pub delay_min: f64,

    /// Maximum delay between trial submissions in seconds
    #[arg(long, default_value_t = 0.3)]
    pub delay_max: f64,

    /// Per-trial request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout: u64,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
    Html,
    All,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
