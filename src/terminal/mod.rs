//! Terminal helpers: boxed output and raw mode.

mod output;

pub use output::*;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Raw mode for the lifetime of the guard.
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn new() -> std::io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}
