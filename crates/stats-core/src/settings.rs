use clap::builder::TypedValueParser;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::error::{Result, StatsError};
use crate::histogram::DEFAULT_BINS;

// ── Enumerated options ─────────────────────────────────────────────────────────

/// Which report a run produces.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// Per-(message, items) statistics of `time/item` from embedded-JSON lines
    Compound,
    /// Per-key statistics of one column from delimited lines
    Keyed,
    /// Raw `time,items,time_per_item` CSV plus a latency histogram
    Latency,
}

/// Column delimiter for delimited input.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Space,
    Tab,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
        }
    }
}

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate benchmark log files into per-key statistics
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bench-stats",
    about = "Aggregate benchmark log files into per-key statistics",
    version
)]
pub struct Settings {
    /// Input benchmark log
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file (TSV report, or CSV for the latency report)
    #[arg(short = 'o', long = "out")]
    pub out: PathBuf,

    /// Report to produce
    #[arg(long, value_enum, default_value_t = ReportKind::Compound)]
    pub report: ReportKind,

    /// Column delimiter for the keyed report
    #[arg(long, value_enum, default_value_t = Delimiter::Space)]
    pub delimiter: Delimiter,

    /// Zero-based column holding the key (keyed report)
    #[arg(long, default_value = "0")]
    pub key_field: usize,

    /// Zero-based column holding the value (keyed report)
    #[arg(long, default_value = "2")]
    pub value_field: usize,

    /// Number of histogram buckets (latency report)
    #[arg(long, default_value_t = DEFAULT_BINS, value_parser = clap::value_parser!(u32).range(1..=100_000).map(|v| v as usize))]
    pub bins: usize,

    /// Skip the interactive histogram (latency report)
    #[arg(long)]
    pub no_plot: bool,

    /// Histogram colour theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, env = "BENCH_STATS_LOG_LEVEL", default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path (defaults to stderr)
    #[arg(long, env = "BENCH_STATS_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply derived overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Cross-field checks clap cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.report == ReportKind::Keyed && self.key_field == self.value_field {
            return Err(StatsError::Config(format!(
                "key and value fields must differ (both are {})",
                self.key_field
            )));
        }
        if self.input == self.out {
            return Err(StatsError::Config(format!(
                "input and output are the same file: {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    /// The delimiter character selected by `--delimiter`.
    pub fn delimiter_char(&self) -> char {
        self.delimiter.as_char()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
