//! Persisted generation defaults and history options.

mod file;

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::history::{self, MAX_HISTORY_ITEMS};
use crate::pass::{Classes, DEFAULT_SYMBOLS, GenerationRequest};

pub use file::default_path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
    pub symbol_set: String,
    /// Passwords per run.
    pub count: usize,
    /// Record generated passwords in the history file.
    pub autosave: bool,
    pub history_limit: usize,
    /// Empty means the default location.
    pub history_path: String,
}

impl Settings {
    pub fn load_from_file() -> Result<Self> {
        Self::load_from(default_path())
    }

    pub fn save_to_file(&self) -> Result<()> {
        self.save_to(default_path())
    }

    /// Load from `path`, writing defaults there when it is missing or malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut settings = Settings::default();
        file::load(path.as_ref(), &mut settings)?;
        Ok(settings)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        file::save(path.as_ref(), self)
    }

    pub fn classes(&self) -> Classes {
        Classes {
            lowercase: self.lowercase,
            uppercase: self.uppercase,
            digits: self.digits,
            symbols: self.symbols,
        }
    }

    pub fn set_classes(&mut self, classes: Classes) {
        self.lowercase = classes.lowercase;
        self.uppercase = classes.uppercase;
        self.digits = classes.digits;
        self.symbols = classes.symbols;
    }

    pub fn request(&self) -> GenerationRequest {
        let mut request = GenerationRequest::new(self.length, self.classes());
        if self.symbol_set != DEFAULT_SYMBOLS {
            request.symbols = Some(self.symbol_set.clone());
        }
        request
    }

    pub fn history_file(&self) -> PathBuf {
        history::resolve_path(&self.history_path)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length: 12,
            lowercase: true,
            uppercase: true,
            digits: true,
            symbols: true,
            symbol_set: DEFAULT_SYMBOLS.to_string(),
            count: 1,
            autosave: false,
            history_limit: MAX_HISTORY_ITEMS,
            history_path: String::new(),
        }
    }
}
