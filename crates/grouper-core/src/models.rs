use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Project bucket used when a record carries no usable `project` value.
pub const UNKNOWN_PROJECT: &str = "unknown";

/// Session bucket used when a record carries no usable `sessionId` value.
pub const NO_SESSION: &str = "no-session";

/// One decoded history line. Field order is preserved from the input.
pub type Record = serde_json::Map<String, serde_json::Value>;

// ── SessionGroup ──────────────────────────────────────────────────────────────

/// Cleaned records that share a session id within one project.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionGroup {
    id: String,
    records: Vec<Record>,
}

impl SessionGroup {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            records: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Mutable access to the record list, used for in-place reordering.
    pub fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── ProjectGroup ──────────────────────────────────────────────────────────────

/// All sessions recorded for one project, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectGroup {
    name: String,
    sessions: Vec<SessionGroup>,
    index: HashMap<String, usize>,
}

impl ProjectGroup {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sessions: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sessions(&self) -> &[SessionGroup] {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> impl Iterator<Item = &mut SessionGroup> {
        self.sessions.iter_mut()
    }

    /// Look up a session by id.
    pub fn session(&self, id: &str) -> Option<&SessionGroup> {
        self.index.get(id).map(|&i| &self.sessions[i])
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Number of records across every session of this project.
    pub fn entry_count(&self) -> usize {
        self.sessions.iter().map(SessionGroup::len).sum()
    }

    /// Return the session bucket for `id`, creating it on first use.
    fn session_entry(&mut self, id: &str) -> &mut SessionGroup {
        let slot = match self.index.get(id) {
            Some(&i) => i,
            None => {
                self.sessions.push(SessionGroup::new(id));
                let i = self.sessions.len() - 1;
                self.index.insert(id.to_string(), i);
                i
            }
        };
        &mut self.sessions[slot]
    }
}

// ── GroupedHistory ────────────────────────────────────────────────────────────

/// Records grouped by project, then by session.
///
/// Projects and sessions keep the order in which they were first seen, and
/// serialize as nested JSON objects in that order:
///
/// ```json
/// { "<project>": { "<sessionId>": [ { ...record... } ] } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedHistory {
    projects: Vec<ProjectGroup>,
    index: HashMap<String, usize>,
}

impl GroupedHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` to the `(project, session)` bucket, creating either
    /// bucket if it does not exist yet.
    pub fn insert(&mut self, project: &str, session: &str, record: Record) {
        let slot = match self.index.get(project) {
            Some(&i) => i,
            None => {
                self.projects.push(ProjectGroup::new(project));
                let i = self.projects.len() - 1;
                self.index.insert(project.to_string(), i);
                i
            }
        };
        self.projects[slot]
            .session_entry(session)
            .records
            .push(record);
    }

    pub fn projects(&self) -> &[ProjectGroup] {
        &self.projects
    }

    pub fn projects_mut(&mut self) -> impl Iterator<Item = &mut ProjectGroup> {
        self.projects.iter_mut()
    }

    /// Look up a project by name.
    pub fn project(&self, name: &str) -> Option<&ProjectGroup> {
        self.index.get(name).map(|&i| &self.projects[i])
    }

    /// Records of one `(project, session)` bucket, if it exists.
    pub fn session(&self, project: &str, session: &str) -> Option<&[Record]> {
        self.project(project)
            .and_then(|p| p.session(session))
            .map(SessionGroup::records)
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Sum of session-bucket counts over all projects.
    pub fn total_sessions(&self) -> usize {
        self.projects.iter().map(ProjectGroup::session_count).sum()
    }

    /// Sum of record counts over all sessions.
    pub fn total_entries(&self) -> usize {
        self.projects.iter().map(ProjectGroup::entry_count).sum()
    }
}

struct SessionsMap<'a>(&'a [SessionGroup]);

impl Serialize for SessionsMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for session in self.0 {
            map.serialize_entry(&session.id, &session.records)?;
        }
        map.end()
    }
}

impl Serialize for GroupedHistory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.projects.len()))?;
        for project in &self.projects {
            map.serialize_entry(&project.name, &SessionsMap(&project.sessions))?;
        }
        map.end()
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Per-project counts derived from a [`GroupedHistory`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStat {
    pub project: String,
    pub session_count: usize,
    pub entry_count: usize,
}

/// Aggregate figures reported after a grouping run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub project_count: usize,
    pub total_sessions: usize,
    pub total_entries: usize,
    /// Sorted by `entry_count`, largest first.
    pub projects: Vec<ProjectStat>,
}

/// A history line that was skipped because it could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostic {
    /// 1-based line number in the input.
    pub line_number: usize,
    /// Leading characters of the offending line.
    pub preview: String,
    /// Decoder error message.
    pub message: String,
}

// ── Tests ─────────────────────────────────────────────────────────────────────
