//! Command-line front end.

mod args;
mod context;
mod prompts;
mod quiet;

use std::process::ExitCode;

pub use args::Cli;
use context::Context;

/// Run the parsed command line and map failures to an exit code.
pub fn run(cli: Cli) -> ExitCode {
    quiet::set(cli.quiet);
    let mut ctx = Context::new(cli);
    match ctx.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            prompts::error(&format!("Error: {e}"));
            ExitCode::from(e.exit_code())
        }
    }
}
