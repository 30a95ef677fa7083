//! History file persistence: a pretty-printed JSON array of strings.

use std::env;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::error::{Error, Result};

pub fn default_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(format!("{}/.config/strongpass/history.json", home))
}

pub(super) fn load(path: &Path) -> Result<Vec<String>> {
    let mut data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no history file");
            return Ok(Vec::new());
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let parsed: std::result::Result<Vec<Value>, _> = serde_json::from_str(&data);
    data.zeroize();
    let items = parsed.map_err(|e| Error::json(path, e))?;

    let total = items.len();
    let entries: Vec<String> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(if b { "True" } else { "False" }.to_string()),
            _ => None,
        })
        .collect();

    if entries.len() < total {
        warn!(
            path = %path.display(),
            skipped = total - entries.len(),
            "ignored unsupported history items"
        );
    }
    debug!(path = %path.display(), entries = entries.len(), "history loaded");
    Ok(entries)
}

pub(super) fn save(path: &Path, entries: &[String]) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut data = serde_json::to_string_pretty(entries).map_err(|e| Error::json(path, e))?;

    let written = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .and_then(|mut file| file.write_all(data.as_bytes()));
    data.zeroize();
    written.map_err(|e| Error::io(path, e))?;

    debug!(path = %path.display(), entries = entries.len(), "history saved");
    Ok(())
}

/// Delete the history file. Already gone is fine.
pub fn remove_file(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::History;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let history = History::load(dir.path().join("none.json"), 10).unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn mixed_items_are_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(
            &path,
            r#"["abc", 42, 1.5, null, {"k": 1}, ["x"], true, false, "z"]"#,
        )
        .unwrap();

        let history = History::load(&path, 10).unwrap();
        assert_eq!(
            history.entries(),
            &["abc", "42", "1.5", "True", "False", "z"]
        );
    }

    #[test]
    fn load_trims_to_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"["1", "2", "3", "4"]"#).unwrap();
        let history = History::load(&path, 2).unwrap();
        assert_eq!(history.entries(), &["1", "2"]);
    }

    #[test]
    fn non_array_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, r#"{"history": []}"#).unwrap();
        assert!(matches!(History::load(&path, 10), Err(Error::Json { .. })));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(History::load(&path, 10), Err(Error::Json { .. })));
    }

    #[test]
    fn save_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/history.json");
        let mut history = History::default();
        history.push("olá€");
        history.push("b\"q");
        history.save(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[\n  \"b\\\"q\",\n  \"olá€\"\n]");

        let back = History::load(&path, 200).unwrap();
        assert_eq!(back, history);
    }

    #[test]
    fn remove_file_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        remove_file(&path).unwrap();
        std::fs::write(&path, "[]").unwrap();
        remove_file(&path).unwrap();
        assert!(!path.exists());
    }
}
