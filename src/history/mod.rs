//! Caller-owned history of generated passwords.
//!
//! Most recent first, bounded to `limit` entries. Entries are wiped when
//! removed, cleared, trimmed, or dropped.

mod file;

use std::path::{Path, PathBuf};

use zeroize::Zeroize;

use crate::error::Result;

pub use file::{default_path, remove_file};

pub const MAX_HISTORY_ITEMS: usize = 200;

#[derive(Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Read a history file. A missing file is an empty history.
    pub fn load(path: impl AsRef<Path>, limit: usize) -> Result<Self> {
        let mut history = Self::new(limit);
        history.entries = file::load(path.as_ref())?;
        history.trim();
        Ok(history)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        file::save(path.as_ref(), &self.entries)
    }

    /// Insert at the front, dropping the oldest entries past the limit.
    pub fn push(&mut self, password: impl Into<String>) {
        self.entries.insert(0, password.into());
        self.trim();
    }

    pub fn remove(&mut self, index: usize) -> Option<String> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn clear(&mut self) {
        self.entries.zeroize();
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit;
        self.trim();
    }

    fn trim(&mut self) {
        for mut old in self.entries.drain(self.limit.min(self.entries.len())..) {
            old.zeroize();
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(MAX_HISTORY_ITEMS)
    }
}

impl Drop for History {
    fn drop(&mut self) {
        self.entries.zeroize();
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History")
            .field("len", &self.entries.len())
            .field("limit", &self.limit)
            .finish()
    }
}

/// Where the history lives: `configured` when set, the default location otherwise.
pub fn resolve_path(configured: &str) -> PathBuf {
    if configured.is_empty() {
        default_path()
    } else {
        PathBuf::from(configured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_prepends() {
        let mut history = History::default();
        history.push("first");
        history.push("second");
        assert_eq!(history.entries(), &["second", "first"]);
        assert_eq!(history.get(0), Some("second"));
        assert_eq!(history.get(2), None);
    }

    #[test]
    fn push_trims_oldest() {
        let mut history = History::new(3);
        for p in ["a", "b", "c", "d", "e"] {
            history.push(p);
        }
        assert_eq!(history.iter().collect::<Vec<_>>(), vec!["e", "d", "c"]);
    }

    #[test]
    fn zero_limit_keeps_nothing() {
        let mut history = History::new(0);
        history.push("x");
        assert!(history.is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut history = History::default();
        history.push("a");
        history.push("b");
        assert_eq!(history.remove(5), None);
        assert_eq!(history.remove(0).as_deref(), Some("b"));
        assert_eq!(history.len(), 1);
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn shrinking_limit_trims() {
        let mut history = History::new(10);
        for p in ["a", "b", "c", "d"] {
            history.push(p);
        }
        history.set_limit(2);
        assert_eq!(history.entries(), &["d", "c"]);
        assert_eq!(history.limit(), 2);
    }

    #[test]
    fn debug_hides_entries() {
        let mut history = History::default();
        history.push("hunter2");
        let shown = format!("{history:?}");
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn configured_path_wins() {
        assert_eq!(resolve_path("/tmp/h.json"), PathBuf::from("/tmp/h.json"));
        assert_eq!(resolve_path(""), default_path());
    }
}
