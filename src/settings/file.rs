//! Settings file persistence.
//!
//! One line of comma separated fields. `|` escapes a literal `,` or `|`
//! inside a field; `|n` and `|r` stand for line breaks.

use std::env;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Settings;
use crate::error::{Error, Result};

const FIELDS: usize = 10;

pub fn default_path() -> PathBuf {
    let home = env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(format!("{}/.config/strongpass/settings", home))
}

pub fn save(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let data = format!(
        "{},{},{},{},{},{},{},{},{},{}\n",
        settings.length,
        settings.lowercase,
        settings.uppercase,
        settings.digits,
        settings.symbols,
        escape(&settings.symbol_set),
        settings.count,
        settings.autosave,
        settings.history_limit,
        escape(&settings.history_path),
    );

    file.write_all(data.as_bytes())
        .map_err(|e| Error::io(path, e))?;
    debug!(path = %path.display(), "settings saved");
    Ok(())
}

pub fn load(path: &Path, settings: &mut Settings) -> Result<()> {
    if !path.exists() {
        debug!(path = %path.display(), "no settings file, writing defaults");
        return save(path, settings);
    }

    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| Error::io(path, e))?;
    let line = line.trim_end_matches(['\n', '\r']);

    if line.is_empty() {
        return save(path, settings);
    }

    let parts = split_escaped(line, ',');
    if parts.len() != FIELDS {
        warn!(
            path = %path.display(),
            fields = parts.len(),
            "malformed settings file, restoring defaults"
        );
        return save(path, settings);
    }

    settings.length = parts[0].parse().unwrap_or(settings.length);
    settings.lowercase = parts[1].parse().unwrap_or(settings.lowercase);
    settings.uppercase = parts[2].parse().unwrap_or(settings.uppercase);
    settings.digits = parts[3].parse().unwrap_or(settings.digits);
    settings.symbols = parts[4].parse().unwrap_or(settings.symbols);
    settings.symbol_set = parts[5].clone();
    settings.count = parts[6].parse().unwrap_or(settings.count);
    settings.autosave = parts[7].parse().unwrap_or(settings.autosave);
    settings.history_limit = parts[8].parse().unwrap_or(settings.history_limit);
    settings.history_path = parts[9].clone();

    Ok(())
}

fn escape(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            ',' | '|' => {
                out.push('|');
                out.push(c);
            }
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            _ => out.push(c),
        }
    }
    out
}

fn split_escaped(s: &str, delimiter: char) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut escape_next = false;

    for c in s.chars() {
        if escape_next {
            current.push(match c {
                'n' => '\n',
                'r' => '\r',
                _ => c,
            });
            escape_next = false;
        } else if c == '|' {
            escape_next = true;
        } else if c == delimiter {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    parts.push(current);
    parts
}
