//! Command trait and context for dispatching commands

use std::path::Path;
use std::time::Instant;

use crate::cli::Cli;
use casematch_core::config::{ConfigSource, EngineConfig};
use casematch_core::error::Result;

/// Shared context for command execution
pub struct CommandContext<'a> {
    pub cli: &'a Cli,
    pub config: EngineConfig,
    pub config_source: ConfigSource,
    pub start: Instant,
}

impl<'a> CommandContext<'a> {
    /// Resolve the configuration that applies to `cwd`
    pub fn load(cli: &'a Cli, cwd: &Path, start: Instant) -> Result<Self> {
        let (config, config_source) = EngineConfig::discover(cli.config.as_deref(), cwd)?;
        Ok(Self {
            cli,
            config,
            config_source,
            start,
        })
    }

    /// Context for commands that never read configuration
    pub fn without_config(cli: &'a Cli, start: Instant) -> Self {
        Self {
            cli,
            config: EngineConfig::default(),
            config_source: ConfigSource::Defaults,
            start,
        }
    }
}

/// Trait for commands that can be executed
pub trait Command {
    fn execute(&self, ctx: &CommandContext) -> Result<()>;
}
