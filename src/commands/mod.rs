//! CLI command implementations for apache-exporter.
//!
//! This module provides implementations for all CLI subcommands:
//! - `scrape`: One-shot collection against the configured upstream
//! - `config`: Configuration file generation

pub mod config;
pub mod scrape;

// Re-export command functions
pub use config::command_config;
pub use scrape::command_scrape;
