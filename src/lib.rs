//! Shiftboss - interactive production-supervisor training console
//!
//! A single-window terminal demo that simulates a supervisor AI training
//! tool: assign tasks to operators, review canned workplace scenarios,
//! receive random safety tips, and evaluate a hardcoded AI-generated
//! workflow. All domain logic is static lookup tables and string formatting
//! rendered into an append-only log.
//!
//! # Modules
//!
//! - [`catalog`] - immutable static data tables
//! - [`session`] - session controller and log-entry formatting
//! - [`tui`] - ratatui front end
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod session;
pub mod tui;

// Re-export commonly used types
pub use catalog::{SAFETY_TIPS, SAMPLE_AI_OUTPUT, SCENARIOS, SUPERVISOR_GUIDANCE, Scenario, TEAM};
pub use config::{Config, UiConfig};
pub use session::{Session, SessionError, TaskAssignment};
