//! Spellbook CLI library.
//!
//! This library provides the core functionality for the `spellbook` command-line
//! interface, including configuration management, the ingest pipeline, export
//! sinks, and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;

pub use cli::{Cli, Command};
pub use config::SpellbookConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
