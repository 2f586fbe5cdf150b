use clap::Parser;
use std::path::{Path, PathBuf};

/// Default name of the JSONL history file that is read.
pub const DEFAULT_INPUT_FILE: &str = "history.jsonl";

/// Default name of the grouped JSON document that is written.
pub const DEFAULT_OUTPUT_FILE: &str = "groupped-history.json";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Group a JSONL interaction history by project and session
#[derive(Parser, Debug, Clone)]
#[command(
    name = "history-grouper",
    about = "Group a JSONL interaction history by project and session",
    version
)]
pub struct Settings {
    /// Logging level
    #[arg(
        long,
        env = "HISTORY_GROUPER_LOG_LEVEL",
        default_value = "WARNING",
        value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"]
    )]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::resolve(Settings::parse_from(args))
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── GrouperConfig ──────────────────────────────────────────────────────────────

/// Source and destination of one grouping run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrouperConfig {
    /// JSONL history to read.
    pub input_path: PathBuf,
    /// Grouped JSON document to write.
    pub output_path: PathBuf,
}

impl Default for GrouperConfig {
    /// Both files in the current working directory.
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

impl GrouperConfig {
    /// Root the default file names in `dir` (used for testing).
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            input_path: dir.join(DEFAULT_INPUT_FILE),
            output_path: dir.join(DEFAULT_OUTPUT_FILE),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
