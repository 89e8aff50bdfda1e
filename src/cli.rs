//! CLI arguments and subcommands for apache-exporter.
//!
//! This module defines the command-line interface structure using the clap library.
//! The telemetry and scrape flags keep their historical dotted/underscored names
//! and can also be supplied through `APACHE_EXPORTER_*` environment variables.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log level options for CLI parsing
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration format options for output
#[derive(Debug, Clone, ValueEnum)]
pub enum ConfigFormat {
    Yaml,
    Json,
    Toml,
}

/// Main CLI arguments structure
#[derive(Parser, Debug)]
#[command(
    name = "apache-exporter",
    about = "Prometheus exporter for Apache mod_status metrics",
    long_about = "Prometheus exporter for Apache mod_status metrics.\n\n\
                  Fetches the Apache server-status page on every scrape and republishes \
                  accesses, traffic, uptime, worker and thread counts in the Prometheus \
                  text format.",
    version,
    propagate_version = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Address on which to expose metrics
    #[arg(long = "telemetry.address", env = "APACHE_EXPORTER_TELEMETRY_ADDRESS")]
    pub listen_address: Option<String>,

    /// Path under which to expose metrics
    #[arg(long = "telemetry.endpoint", env = "APACHE_EXPORTER_TELEMETRY_ENDPOINT")]
    pub metrics_path: Option<String>,

    /// URI to apache stub status page
    #[arg(long = "scrape_uri", env = "APACHE_EXPORTER_SCRAPE_URI")]
    pub scrape_uri: Option<String>,

    /// Ignore server certificate if using https
    #[arg(long, env = "APACHE_EXPORTER_INSECURE")]
    pub insecure: bool,

    /// Upstream request timeout in seconds (no deadline when unset)
    #[arg(long, env = "APACHE_EXPORTER_SCRAPE_TIMEOUT")]
    pub scrape_timeout: Option<u64>,

    /// Log level (overrides log_level from the config file; default: info)
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Config file (YAML/JSON/TOML)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Disable all config file loading
    #[arg(long)]
    pub no_config: bool,

    /// Print effective merged config and exit
    #[arg(long)]
    pub show_config: bool,

    /// Output format for --show-config
    #[arg(long, value_enum, default_value = "yaml")]
    pub config_format: ConfigFormat,

    /// Validate config and exit (return code 1 on error)
    #[arg(long)]
    pub check_config: bool,

    /// Enable TLS/SSL for the metrics endpoint
    #[arg(long)]
    pub enable_tls: bool,

    /// Path to TLS certificate file (PEM format)
    #[arg(long)]
    pub tls_cert: Option<PathBuf>,

    /// Path to TLS private key file (PEM format)
    #[arg(long)]
    pub tls_key: Option<PathBuf>,
}

/// Subcommands for additional functionality
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape the status page and print the resulting metrics
    Scrape {
        /// Number of collection cycles
        #[arg(short = 'n', long, default_value_t = 1)]
        iterations: usize,
    },

    /// Generate configuration files
    Config {
        /// Output file path ("-" for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ConfigFormat,

        /// Include comments and examples
        #[arg(long)]
        commented: bool,
    },
}
