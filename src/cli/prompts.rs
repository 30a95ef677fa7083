//! User-facing messages and prompts.
//!
//! Warnings and summaries respect quiet mode; errors are always shown.

use std::io::Write;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Stylize;

use super::quiet;
use crate::terminal::{RawModeGuard, format_number};

/// Yellow warning on stderr, suppressed in quiet mode.
pub fn warn(msg: &str) {
    if !quiet::enabled() {
        eprintln!("{}", msg.yellow());
    }
}

/// Red error on stderr.
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

pub fn info(msg: &str) {
    if !quiet::enabled() {
        eprintln!("{msg}");
    }
}

pub fn urandom_unavailable() {
    warn("Warning: /dev/urandom not available, using getrandom");
}

pub fn history_load_failed(err: &strongpass::Error) {
    warn(&format!("Error loading history (ignored): {err}"));
}

pub fn passwords_recorded(count: usize, path: &Path) {
    info(&format!(
        "{} password(s) recorded \u{2192} {}",
        format_number(count),
        path.display()
    ));
}

pub fn history_saved(path: &Path) {
    info(&format!("History saved to {}", path.display()));
}

pub fn history_cleared() {
    info("History cleared.");
}

pub fn plaintext_warning() {
    warn("Warning: history is stored in plaintext. Don't record sensitive passwords.");
}

/// Ask a yes/no question on a single key press. Anything but `y` is no.
///
/// Never prompts when quiet or non-interactive; answers no instead.
pub fn confirm(question: &str) -> bool {
    if quiet::skip_prompt() {
        return false;
    }

    eprint!("{} [y/N]: ", question.yellow());
    let _ = std::io::stderr().flush();

    let answer = match RawModeGuard::new() {
        Ok(_guard) => read_key_answer(),
        Err(_) => read_line_answer(),
    };

    eprintln!("{}", if answer { "y" } else { "n" });
    answer
}

fn read_key_answer() -> bool {
    loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let is_ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                return !is_ctrl_c && matches!(key.code, KeyCode::Char('y' | 'Y'));
            }
            Ok(_) => continue,
            Err(_) => return false,
        }
    }
}

fn read_line_answer() -> bool {
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}
