pub mod config;

use clap::{Parser, Subcommand};

use ums_domain::config::Config;

/// uploadmock — a mock upload/validation service for ingest integration tests.
#[derive(Debug, Parser)]
#[command(name = "uploadmock", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the mock server (default when no subcommand is given).
    Serve,
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Dump the resolved configuration (env + defaults) as JSON.
    Show,
}

/// Resolve configuration from the environment, surfacing config errors
/// before anything binds or spawns.
pub fn load_config() -> anyhow::Result<Config> {
    Ok(Config::from_env()?)
}
