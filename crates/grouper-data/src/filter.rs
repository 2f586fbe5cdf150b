//! Field filtering for decoded records.

use std::collections::HashSet;

use grouper_core::models::Record;

/// Keys stripped from every record before it is grouped.
pub const EXCLUDED_FIELDS: &[&str] = &["project", "pastedContents"];

/// Selects which keys of a record survive cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldFilter {
    /// Keep only the listed keys.
    Allow(HashSet<String>),
    /// Keep every key except the listed ones.
    Deny(HashSet<String>),
}

impl Default for FieldFilter {
    /// Deny [`EXCLUDED_FIELDS`].
    fn default() -> Self {
        Self::deny(EXCLUDED_FIELDS.iter().copied())
    }
}

impl FieldFilter {
    pub fn allow<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Allow(keys.into_iter().map(Into::into).collect())
    }

    pub fn deny<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Deny(keys.into_iter().map(Into::into).collect())
    }

    /// Whether `key` is kept by this filter.
    pub fn keeps(&self, key: &str) -> bool {
        match self {
            Self::Allow(keys) => keys.contains(key),
            Self::Deny(keys) => !keys.contains(key),
        }
    }

    /// Return `record` with filtered keys removed. Remaining values and their
    /// order are untouched.
    pub fn apply(&self, record: Record) -> Record {
        record.into_iter().filter(|(k, _)| self.keeps(k)).collect()
    }
}
