//! Statistics over a grouped history.

use grouper_core::models::{GroupedHistory, HistorySummary, ProjectStat};

// ── HistorySummarizer ─────────────────────────────────────────────────────────

/// Stateless helper that derives counts from a [`GroupedHistory`].
pub struct HistorySummarizer;

impl HistorySummarizer {
    /// Count sessions and entries per project and overall.
    ///
    /// The project list is sorted by entry count, largest first. The sort is
    /// stable, so projects with equal counts keep their first-seen order.
    pub fn summarize(grouped: &GroupedHistory) -> HistorySummary {
        let mut projects: Vec<ProjectStat> = grouped
            .projects()
            .iter()
            .map(|p| ProjectStat {
                project: p.name().to_string(),
                session_count: p.session_count(),
                entry_count: p.entry_count(),
            })
            .collect();

        let total_sessions = projects.iter().map(|s| s.session_count).sum();
        let total_entries = projects.iter().map(|s| s.entry_count).sum();

        projects.sort_by(|a, b| b.entry_count.cmp(&a.entry_count));

        HistorySummary {
            project_count: projects.len(),
            total_sessions,
            total_entries,
            projects,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
