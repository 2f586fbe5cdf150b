//! End-to-end grouping run.
//!
//! Reads the configured history file, groups and sorts it, writes the
//! grouped document and returns a [`RunReport`] for the console layer.

use std::path::PathBuf;

use grouper_core::models::{HistorySummary, ParseDiagnostic};
use grouper_core::settings::GrouperConfig;
use grouper_core::time_utils::format_timestamp;
use grouper_core::Result;
use tracing::info;

use crate::grouper::HistoryGrouper;
use crate::reader::read_history;
use crate::summary::HistorySummarizer;
use crate::writer::write_grouped;

// ── Public types ──────────────────────────────────────────────────────────────

/// Everything the caller needs to report on a finished run.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    /// Where the grouped document was written.
    pub output_path: PathBuf,
    /// ISO-8601 time the run finished.
    pub generated_at: String,
    pub summary: HistorySummary,
    /// Lines that were skipped because they could not be decoded.
    pub diagnostics: Vec<ParseDiagnostic>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full grouping pipeline.
///
/// 1. Read the input file into memory.
/// 2. Group records by project and session.
/// 3. Sort each session by timestamp.
/// 4. Write the grouped document.
/// 5. Summarize.
///
/// Only I/O failures on the input or output are returned as errors; bad lines
/// end up in [`RunReport::diagnostics`].
pub fn run(config: &GrouperConfig) -> Result<RunReport> {
    run_with(&HistoryGrouper::new(), config)
}

/// [`run`] with a caller-supplied grouper.
pub fn run_with(grouper: &HistoryGrouper, config: &GrouperConfig) -> Result<RunReport> {
    info!("Reading history from {}", config.input_path.display());
    let content = read_history(&config.input_path)?;

    let outcome = grouper.process(content.lines());

    write_grouped(&config.output_path, &outcome.history)?;

    let summary = HistorySummarizer::summarize(&outcome.history);
    info!(
        "Wrote {} projects, {} sessions, {} entries to {}",
        summary.project_count,
        summary.total_sessions,
        summary.total_entries,
        config.output_path.display()
    );

    Ok(RunReport {
        output_path: config.output_path.clone(),
        generated_at: format_timestamp(None),
        summary,
        diagnostics: outcome.diagnostics,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FieldFilter;
    use grouper_core::GrouperError;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn setup(content: &str) -> (TempDir, GrouperConfig) {
        let dir = TempDir::new().unwrap();
        let config = GrouperConfig::in_dir(dir.path());
        std::fs::write(&config.input_path, content).unwrap();
        (dir, config)
    }

    fn read_output(config: &GrouperConfig) -> Value {
        let text = std::fs::read_to_string(&config.output_path).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_run_example_scenario() {
        let (_dir, config) = setup(
            "{\"project\":\"a\",\"sessionId\":\"s1\",\"timestamp\":2,\"x\":1}\n\
             {\"project\":\"a\",\"sessionId\":\"s1\",\"timestamp\":1,\"x\":2}\n\
             {\"sessionId\":\"s2\",\"timestamp\":5,\"x\":3}\n",
        );

        let report = run(&config).unwrap();

        assert_eq!(report.output_path, config.output_path);
        assert_eq!(report.summary.project_count, 2);
        assert_eq!(report.summary.total_sessions, 2);
        assert_eq!(report.summary.total_entries, 3);
        assert!(report.diagnostics.is_empty());

        assert_eq!(
            read_output(&config),
            json!({
                "a": {"s1": [
                    {"sessionId": "s1", "timestamp": 1, "x": 2},
                    {"sessionId": "s1", "timestamp": 2, "x": 1},
                ]},
                "unknown": {"s2": [
                    {"sessionId": "s2", "timestamp": 5, "x": 3},
                ]},
            })
        );
    }

    #[test]
    fn test_run_skips_malformed_line() {
        let (_dir, config) = setup(
            "{\"project\":\"p\",\"sessionId\":\"s\",\"timestamp\":1}\n\
             this is not json\n\
             {\"project\":\"p\",\"sessionId\":\"s\",\"timestamp\":2}\n",
        );

        let report = run(&config).unwrap();

        assert_eq!(report.summary.total_entries, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].line_number, 2);
        assert_eq!(report.diagnostics[0].preview, "this is not json");
    }

    #[test]
    fn test_run_invalid_utf8_line_is_not_fatal() {
        let dir = TempDir::new().unwrap();
        let config = GrouperConfig::in_dir(dir.path());
        let mut bytes = b"{\"project\":\"p\",\"sessionId\":\"s\",\"timestamp\":1}\n".to_vec();
        bytes.extend_from_slice(b"\xff\xfe\n");
        bytes.extend_from_slice(b"{\"project\":\"p\",\"sessionId\":\"s\",\"timestamp\":2}\n");
        std::fs::write(&config.input_path, bytes).unwrap();

        let report = run(&config).unwrap();

        assert_eq!(report.summary.total_entries, 2);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].line_number, 2);
        assert!(config.output_path.is_file());
    }

    #[test]
    fn test_run_empty_input() {
        let (_dir, config) = setup("");

        let report = run(&config).unwrap();

        assert_eq!(report.summary, HistorySummary::default());
        assert!(report.diagnostics.is_empty());
        assert_eq!(read_output(&config), json!({}));
    }

    #[test]
    fn test_run_missing_input_is_fatal_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = GrouperConfig::in_dir(dir.path());

        let err = run(&config).unwrap_err();

        assert!(matches!(err, GrouperError::FileRead { .. }));
        assert!(!config.output_path.exists());
    }

    #[test]
    fn test_run_with_custom_filter() {
        let (_dir, config) = setup("{\"project\":\"p\",\"sessionId\":\"s\",\"display\":\"d\"}\n");
        let grouper = HistoryGrouper::with_filter(FieldFilter::deny(["project", "display"]));

        run_with(&grouper, &config).unwrap();

        assert_eq!(read_output(&config), json!({"p": {"s": [{"sessionId": "s"}]}}));
    }

    #[test]
    fn test_run_report_serializes() {
        let (_dir, config) = setup("{\"project\":\"p\"}\n");
        let report = run(&config).unwrap();

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["summary"]["totalEntries"], json!(1));
        assert_eq!(value["summary"]["projects"][0]["sessionCount"], json!(1));
    }
}
