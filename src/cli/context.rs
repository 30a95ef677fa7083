//! CLI context: saved settings plus the parsed command line.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};
use zeroize::Zeroize;

use strongpass::history::{self, History};
use strongpass::rand::{Source, urand};
use strongpass::{Classes, GenerationRequest, Settings, generate_with, settings};

use super::args::{Cli, Command, ConfigAction, ConfigSet, GenArgs, HistoryAction};
use super::{prompts, quiet};
use crate::terminal::{box_bottom, box_kv, box_line, box_top};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] strongpass::Error),

    #[error("no history entry #{0}")]
    NoSuchEntry(usize),

    #[error("{0}")]
    Output(#[from] io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(e) if e.is_invalid_request() => 2,
            CliError::NoSuchEntry(_) => 2,
            _ => 1,
        }
    }
}

type Result<T> = std::result::Result<T, CliError>;

pub struct Context {
    cli: Cli,
    settings: Settings,
    settings_path: PathBuf,
}

impl Context {
    pub fn new(cli: Cli) -> Self {
        let settings_path = settings::default_path();
        let settings = Settings::load_from(&settings_path).unwrap_or_else(|e| {
            prompts::warn(&format!("Failed to load settings: {}", e));
            Settings::default()
        });
        Self {
            cli,
            settings,
            settings_path,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        match self.cli.command.take() {
            None => self.generate(),
            Some(Command::History { action }) => self.history(action),
            Some(Command::Config { action }) => self.config(action),
        }
    }

    // =========================================================================
    // Generation
    // =========================================================================

    fn generate(&self) -> Result<()> {
        let args = &self.cli.gen_args;
        let request = build_request(&self.settings, args);
        request.validate().map_err(strongpass::Error::from)?;

        let count = args.number.unwrap_or(self.settings.count);
        let record = (self.settings.autosave || args.record) && !args.no_record;
        let mut source = self.source();
        let mut history = record.then(|| self.load_history());

        debug!(count, record, source = source.name(), "starting generation");

        write_passwords(
            &mut io::stdout().lock(),
            &request,
            &mut source,
            count,
            history.as_mut(),
        )?;

        if let Some(history) = history
            && count > 0
        {
            let path = self.settings.history_file();
            if !path.exists() {
                prompts::plaintext_warning();
            }
            history.save(&path)?;
            prompts::passwords_recorded(count.min(history.limit()), &path);
        }

        info!(count, "generation complete");
        Ok(())
    }

    fn source(&self) -> Source {
        if !self.cli.gen_args.urandom {
            return Source::os();
        }
        if !urand::is_available() {
            prompts::urandom_unavailable();
            return Source::os();
        }
        Source::urandom().unwrap_or_else(|e| {
            debug!(error = %e, "opening /dev/urandom failed");
            prompts::urandom_unavailable();
            Source::os()
        })
    }

    fn load_history(&self) -> History {
        let path = self.settings.history_file();
        History::load(&path, self.settings.history_limit).unwrap_or_else(|e| {
            prompts::history_load_failed(&e);
            History::new(self.settings.history_limit)
        })
    }

    // =========================================================================
    // History
    // =========================================================================

    fn history(&self, action: HistoryAction) -> Result<()> {
        let path = self.settings.history_file();
        match action {
            HistoryAction::List => {
                let history = History::load(&path, self.settings.history_limit)?;
                print_history(&mut io::stdout().lock(), &history)?;
            }
            HistoryAction::Remove { index } => {
                let mut history = History::load(&path, self.settings.history_limit)?;
                let mut removed = index
                    .checked_sub(1)
                    .and_then(|i| history.remove(i))
                    .ok_or(CliError::NoSuchEntry(index))?;
                removed.zeroize();
                history.save(&path)?;
                prompts::info(&format!("Removed entry #{index}."));
            }
            HistoryAction::Clear { yes } => {
                if !yes && !prompts::confirm("Clear history? This removes locally saved items.") {
                    if quiet::skip_prompt() {
                        prompts::error("Not clearing without confirmation; pass --yes.");
                    }
                    return Ok(());
                }
                history::remove_file(&path)?;
                prompts::history_cleared();
            }
            HistoryAction::Export { path: target } => {
                let history = History::load(&path, self.settings.history_limit)?;
                if history.is_empty() {
                    prompts::info("No items in history.");
                    return Ok(());
                }
                history.save(&target)?;
                prompts::history_saved(&target);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Config
    // =========================================================================

    fn config(&mut self, action: ConfigAction) -> Result<()> {
        match action {
            ConfigAction::Show => {}
            ConfigAction::Set(set) => {
                apply_config(&mut self.settings, set);
                self.settings.save_to(&self.settings_path)?;
            }
            ConfigAction::Reset => {
                self.settings = Settings::default();
                self.settings.save_to(&self.settings_path)?;
            }
        }
        print_settings(&mut io::stdout().lock(), &self.settings)?;
        Ok(())
    }
}

/// One password per line. A password is recorded only once its line has
/// been written, and any write or flush failure aborts the run.
fn write_passwords(
    out: &mut impl Write,
    request: &GenerationRequest,
    source: &mut Source,
    count: usize,
    mut history: Option<&mut History>,
) -> Result<()> {
    for _ in 0..count {
        let password = generate_with(request, source)?;
        writeln!(out, "{password}")?;
        if let Some(history) = history.as_deref_mut() {
            history.push(password.as_str());
        }
    }
    out.flush()?;
    Ok(())
}

/// Saved settings with this run's flags applied on top.
fn build_request(settings: &Settings, args: &GenArgs) -> GenerationRequest {
    let mut request = settings.request();
    if let Some(length) = args.length {
        request.length = length;
    }
    if args.all {
        request.classes = Classes::ALL;
    }
    if args.no_lower {
        request.classes.lowercase = false;
    }
    if args.no_upper {
        request.classes.uppercase = false;
    }
    if args.no_digits {
        request.classes.digits = false;
    }
    if args.no_symbols {
        request.classes.symbols = false;
    }
    if let Some(set) = &args.symbol_set {
        request.symbols = Some(set.clone());
    }
    request
}

fn apply_config(settings: &mut Settings, set: ConfigSet) {
    if let Some(v) = set.length {
        settings.length = v;
    }
    if let Some(v) = set.number {
        settings.count = v;
    }
    if let Some(v) = set.lowercase {
        settings.lowercase = v;
    }
    if let Some(v) = set.uppercase {
        settings.uppercase = v;
    }
    if let Some(v) = set.digits {
        settings.digits = v;
    }
    if let Some(v) = set.symbols {
        settings.symbols = v;
    }
    if let Some(v) = set.symbol_set {
        settings.symbol_set = v;
    }
    if let Some(v) = set.autosave {
        settings.autosave = v;
    }
    if let Some(v) = set.history_limit {
        settings.history_limit = v;
    }
    if let Some(v) = set.history_path {
        settings.history_path = v;
    }
}

fn print_history(out: &mut impl Write, history: &History) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "No items in history.");
    }
    box_top(out, "History")?;
    for (i, entry) in history.iter().enumerate() {
        box_line(out, &format!("{:>3}  {}", i + 1, entry))?;
    }
    box_bottom(out)
}

fn print_settings(out: &mut impl Write, settings: &Settings) -> io::Result<()> {
    let on = |b: bool| if b { "yes" } else { "no" };
    box_top(out, "Settings")?;
    box_kv(out, "length", &settings.length.to_string())?;
    box_kv(out, "passwords", &settings.count.to_string())?;
    box_kv(out, "lowercase", on(settings.lowercase))?;
    box_kv(out, "uppercase", on(settings.uppercase))?;
    box_kv(out, "digits", on(settings.digits))?;
    box_kv(out, "symbols", on(settings.symbols))?;
    box_kv(out, "symbol set", &settings.symbol_set)?;
    box_kv(out, "autosave", on(settings.autosave))?;
    box_kv(out, "history limit", &settings.history_limit.to_string())?;
    box_kv(out, "history file", &settings.history_file().display().to_string())?;
    box_bottom(out)
}
