//! Output of the grouped history document.

use std::io::Write;
use std::path::Path;

use grouper_core::models::GroupedHistory;
use grouper_core::{GrouperError, Result};
use tracing::debug;

/// Write `grouped` to `path` as pretty-printed JSON (2-space indent).
///
/// The document goes to a temporary file in the destination directory that
/// is then renamed over `path`. The temporary file is removed on every
/// failure, so a failed run leaves neither a partial document nor a stray
/// temporary behind. Missing parent directories are created.
pub fn write_grouped(path: &Path, grouped: &GroupedHistory) -> Result<()> {
    let json = serde_json::to_string_pretty(grouped)?;

    let write_err = |source| GrouperError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent).map_err(write_err)?;
            parent
        }
        None => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".groupped-history")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(json.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    debug!("Wrote {} bytes to {}", json.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use grouper_core::models::Record;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn sample() -> GroupedHistory {
        let mut g = GroupedHistory::new();
        let record: Record = json!({"display": "hi", "timestamp": 1})
            .as_object()
            .cloned()
            .unwrap();
        g.insert("p", "s", record);
        g
    }

    #[test]
    fn test_write_grouped_pretty_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groupped-history.json");

        write_grouped(&path, &sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"p\": {\n    \"s\": ["));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"p": {"s": [{"display": "hi", "timestamp": 1}]}}));
    }

    #[test]
    fn test_write_grouped_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_grouped(&path, &GroupedHistory::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_grouped_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.json");

        write_grouped(&path, &sample()).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_write_grouped_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        write_grouped(&path, &sample()).unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
    }

    #[test]
    fn test_write_grouped_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale").unwrap();

        write_grouped(&path, &GroupedHistory::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_write_grouped_blocked_parent_dir() {
        let dir = TempDir::new().unwrap();
        // A regular file where the parent directory should be.
        std::fs::write(dir.path().join("blocked"), "").unwrap();
        let path = dir.path().join("blocked").join("out.json");

        let err = write_grouped(&path, &sample()).unwrap_err();

        assert!(matches!(err, GrouperError::FileWrite { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_grouped_unwritable_destination() {
        let dir = TempDir::new().unwrap();
        // A directory occupies the target path, so the rename cannot succeed.
        let path = dir.path().join("taken.json");
        std::fs::create_dir_all(path.join("child")).unwrap();

        let err = write_grouped(&path, &sample()).unwrap_err();

        assert!(matches!(err, GrouperError::FileWrite { .. }));
        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("taken.json")]);
    }
}
