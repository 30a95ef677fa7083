use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod terminal;

fn main() -> ExitCode {
    disable_core_dumps();

    let args = cli::Cli::parse();
    init_logging(args.verbose, args.quiet);
    cli::run(args)
}

/// Diagnostics go to stderr so stdout carries only passwords and listings.
/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strongpass={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Keep generated passwords out of core dumps and ptrace.
#[cfg(target_os = "linux")]
fn disable_core_dumps() {
    unsafe {
        libc::prctl(libc::PR_SET_DUMPABLE, 0);
    }
}

#[cfg(not(target_os = "linux"))]
fn disable_core_dumps() {}
