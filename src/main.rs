//! Shiftboss - interactive production-supervisor training console
//!
//! CLI entry point: no subcommand launches the TUI; the listing subcommands
//! print the static catalogs without entering it.

use std::fs;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use shiftboss::catalog::{SAFETY_TIPS, SCENARIOS, TEAM};
use shiftboss::cli::{Cli, Command, get_log_path};
use shiftboss::config::Config;
use shiftboss::tui;

/// Set up tracing to a log file
///
/// The TUI owns stdout, so logs go to a file under the local data dir.
/// Level priority: CLI --log-level > config file > INFO default.
fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Team) => {
            debug!("main: matched Team command");
            cmd_team()
        }
        Some(Command::Scenarios) => {
            debug!("main: matched Scenarios command");
            cmd_scenarios()
        }
        Some(Command::Tips) => {
            debug!("main: matched Tips command");
            cmd_tips()
        }
        None => {
            debug!("main: no command specified, launching console");
            cmd_console(&config).await
        }
    }
}

/// Launch the interactive console
async fn cmd_console(config: &Config) -> Result<()> {
    debug!("cmd_console: called");
    info!("Launching supervisor console");
    tui::run(config).await
}

/// List the team roster
fn cmd_team() -> Result<()> {
    debug!("cmd_team: called");
    println!("Team roster:");
    for operator in TEAM {
        println!("  {}", operator);
    }
    Ok(())
}

/// List the scenario catalog with expected actions
fn cmd_scenarios() -> Result<()> {
    debug!("cmd_scenarios: called");
    println!("Scenario catalog:");
    println!();
    for scenario in SCENARIOS {
        println!("  {}", scenario.title);
        println!("    {}", scenario.details);
        for step in scenario.expected_actions {
            println!("    - {}", step);
        }
        println!();
    }
    Ok(())
}

/// List the safety briefing tips
fn cmd_tips() -> Result<()> {
    debug!("cmd_tips: called");
    println!("Safety briefing tips:");
    for tip in SAFETY_TIPS {
        println!("  - {}", tip);
    }
    Ok(())
}
