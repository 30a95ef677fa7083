use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "strongpass",
    author,
    version,
    about = "Strong password generator with a local history",
    long_about = None
)]
pub struct Cli {
    #[command(flatten)]
    pub gen_args: GenArgs,

    /// Suppress warnings and summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Options that override saved settings for a single run.
#[derive(Args, Debug, Default, Clone)]
pub struct GenArgs {
    /// Password length in characters
    #[arg(short, long, value_name = "N")]
    pub length: Option<usize>,

    /// Number of passwords to generate
    #[arg(short, long, value_name = "N")]
    pub number: Option<usize>,

    /// Select all four character classes, ignoring saved class choices
    #[arg(short, long)]
    pub all: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    pub no_lower: bool,

    /// Leave out uppercase letters
    #[arg(long)]
    pub no_upper: bool,

    /// Leave out digits
    #[arg(long)]
    pub no_digits: bool,

    /// Leave out symbols
    #[arg(long)]
    pub no_symbols: bool,

    /// Characters used for the symbol class
    #[arg(long, value_name = "SET")]
    pub symbol_set: Option<String>,

    /// Read randomness from /dev/urandom instead of getrandom
    #[arg(short, long)]
    pub urandom: bool,

    /// Record generated passwords in the history file
    #[arg(long, conflicts_with = "no_record")]
    pub record: bool,

    /// Do not record, even when autosave is on
    #[arg(long)]
    pub no_record: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect or edit the password history
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Show or change saved settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List stored passwords, most recent first
    List,
    /// Delete one entry by its listed number
    Remove {
        #[arg(value_name = "NUMBER")]
        index: usize,
    },
    /// Delete every entry and the history file
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Write the history to another file
    Export { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print saved settings
    Show,
    /// Change saved settings
    Set(ConfigSet),
    /// Restore defaults
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct ConfigSet {
    #[arg(long, value_name = "N")]
    pub length: Option<usize>,

    #[arg(long, value_name = "N")]
    pub number: Option<usize>,

    #[arg(long, value_name = "BOOL")]
    pub lowercase: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub uppercase: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub digits: Option<bool>,

    #[arg(long, value_name = "BOOL")]
    pub symbols: Option<bool>,

    #[arg(long, value_name = "SET")]
    pub symbol_set: Option<String>,

    #[arg(long, value_name = "BOOL")]
    pub autosave: Option<bool>,

    #[arg(long, value_name = "N")]
    pub history_limit: Option<usize>,

    /// History file location; an empty string restores the default
    #[arg(long, value_name = "PATH")]
    pub history_path: Option<String>,
}
