//! Grouping of history records by project and session.

use grouper_core::data_processors::{DataConverter, TimestampProcessor};
use grouper_core::formatting::truncate_preview;
use grouper_core::models::{GroupedHistory, ParseDiagnostic, NO_SESSION, UNKNOWN_PROJECT};
use tracing::debug;

use crate::filter::FieldFilter;
use crate::reader::{is_blank, parse_line};

/// Number of leading characters of a bad line kept in its diagnostic.
pub const PREVIEW_CHARS: usize = 50;

/// Result of [`HistoryGrouper::group`].
#[derive(Debug, Clone, Default)]
pub struct GroupOutcome {
    pub history: GroupedHistory,
    /// One entry per non-blank line that could not be decoded.
    pub diagnostics: Vec<ParseDiagnostic>,
}

/// Builds a [`GroupedHistory`] from JSONL lines.
#[derive(Debug, Clone, Default)]
pub struct HistoryGrouper {
    filter: FieldFilter,
}

impl HistoryGrouper {
    /// Grouper that strips `project` and `pastedContents` from every record.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: FieldFilter) -> Self {
        Self { filter }
    }

    /// Decode every non-blank line and file it under its project and session.
    ///
    /// Undecodable lines are skipped and reported in
    /// [`GroupOutcome::diagnostics`]; they never stop the pass. Records keep
    /// input order inside their bucket.
    pub fn group<I, S>(&self, lines: I) -> GroupOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = GroupOutcome::default();
        let mut parsed = 0usize;

        for (idx, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if is_blank(line) {
                continue;
            }

            let record = match parse_line(line) {
                Ok(r) => r,
                Err(e) => {
                    let diagnostic = ParseDiagnostic {
                        line_number: idx + 1,
                        preview: truncate_preview(line, PREVIEW_CHARS).to_string(),
                        message: e.to_string(),
                    };
                    debug!(
                        "Skipping line {}: {}",
                        diagnostic.line_number, diagnostic.message
                    );
                    outcome.diagnostics.push(diagnostic);
                    continue;
                }
            };

            let project = DataConverter::bucket_key(record.get("project"), UNKNOWN_PROJECT);
            let session = DataConverter::bucket_key(record.get("sessionId"), NO_SESSION);
            let cleaned = self.filter.apply(record);

            outcome.history.insert(&project, &session, cleaned);
            parsed += 1;
        }

        debug!(
            "Grouped {} records into {} projects, {} lines skipped",
            parsed,
            outcome.history.project_count(),
            outcome.diagnostics.len()
        );

        outcome
    }

    /// Order every session's records by ascending `timestamp`.
    ///
    /// Timestamps compare numerically (see [`TimestampProcessor::sort_key`]).
    /// Records whose timestamp is missing or not numeric go after the numeric
    /// ones. The sort is stable, so ties keep input order.
    pub fn sort_sessions(grouped: &mut GroupedHistory) {
        for project in grouped.projects_mut() {
            for session in project.sessions_mut() {
                session.records_mut().sort_by(TimestampProcessor::compare);
            }
        }
    }

    /// [`group`](Self::group) followed by [`sort_sessions`](Self::sort_sessions).
    pub fn process<I, S>(&self, lines: I) -> GroupOutcome
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut outcome = self.group(lines);
        Self::sort_sessions(&mut outcome.history);
        outcome
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
