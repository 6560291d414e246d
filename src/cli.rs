//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Shiftboss - interactive production-supervisor training console
#[derive(Parser)]
#[command(
    name = "shiftboss",
    about = "Interactive production-supervisor training console",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute; none launches the console
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the team roster
    Team,

    /// List the scenario catalog with expected actions
    Scenarios,

    /// List the safety briefing tips
    Tips,
}

/// Path of the log file written by the console
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("shiftboss")
        .join("logs")
        .join("shiftboss.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_launches_console() {
        let cli = Cli::parse_from(["shiftboss"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["shiftboss", "--log-level", "DEBUG", "scenarios"]);
        assert_eq!(cli.log_level.as_deref(), Some("DEBUG"));
        assert!(matches!(cli.command, Some(Command::Scenarios)));
    }
}
