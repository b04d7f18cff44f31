//! Command dispatch logic for casematch

use std::time::Instant;

use crate::cli::{Cli, Commands};
use casematch_core::error::{CaseMatchError, Result};
use tracing::debug;

mod command;
mod macros;

pub(crate) use macros::trace_command;

pub use command::{Command, CommandContext};

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    if !cli.command.reads_config() {
        return cli.command.execute(&CommandContext::without_config(cli, start));
    }

    let cwd = std::env::current_dir()
        .map_err(|e| CaseMatchError::io_operation("resolve", "working directory", e))?;

    let ctx = CommandContext::load(cli, &cwd, start)?;

    debug!(
        elapsed = ?start.elapsed(),
        source = %ctx.config_source,
        "load_config"
    );

    cli.command.execute(&ctx)
}

impl Command for Commands {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Commands::Similar {
                input,
                query,
                threshold,
                limit,
            } => crate::commands::similar::execute(ctx, input, query, *threshold, *limit),
            Commands::Duplicates { input, threshold } => {
                crate::commands::duplicates::execute(ctx, input, *threshold)
            }
            Commands::Tokens { text } => crate::commands::tokens::execute(ctx.cli, text),
        }
    }
}
