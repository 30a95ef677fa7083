//! Boxed listings and number formatting.

use std::io::{self, Write};

pub const BOX_WIDTH: usize = 74;

/// Column where values start in key/value rows.
const KEY_COL: usize = 18;

pub fn format_number(num: usize) -> String {
    let s = num.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

/// `┌─ Title ────┐`
pub fn box_top(out: &mut impl Write, title: &str) -> io::Result<()> {
    if title.is_empty() {
        return writeln!(out, "┌{}┐", "─".repeat(BOX_WIDTH - 2));
    }
    let title_part = format!("─ {} ", title);
    let remaining = (BOX_WIDTH - 2).saturating_sub(title_part.chars().count());
    writeln!(out, "┌{}{}┐", title_part, "─".repeat(remaining))
}

/// `│ content      │`; content wider than the box overflows the border.
pub fn box_line(out: &mut impl Write, content: &str) -> io::Result<()> {
    let inner_width = BOX_WIDTH - 4;
    let padding = inner_width.saturating_sub(console_width(content));
    writeln!(out, "│ {}{} │", content, " ".repeat(padding))
}

/// `│ key         value │`
pub fn box_kv(out: &mut impl Write, key: &str, value: &str) -> io::Result<()> {
    let key_padded = format!("{key:<width$}", width = KEY_COL);
    box_line(out, &format!("{key_padded}{value}"))
}

/// `└────────────┘`
pub fn box_bottom(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "└{}┘", "─".repeat(BOX_WIDTH - 2))
}

/// Display width in columns, skipping ANSI escape sequences.
fn console_width(s: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape {
            if c == 'm' {
                in_escape = false;
            }
        } else {
            width += 1;
        }
    }
    width
}
