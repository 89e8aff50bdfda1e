//! Configuration management for apache-exporter.
//!
//! This module handles loading, merging, and validating configuration from files
//! and CLI arguments. It supports YAML, JSON, and TOML formats.

use crate::cli::{Args, ConfigFormat};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

// Default configuration constants
pub const DEFAULT_LISTEN_ADDRESS: &str = ":9117";
pub const DEFAULT_METRICS_PATH: &str = "/metrics";
pub const DEFAULT_SCRAPE_URI: &str = "http://localhost/server-status/?auto";

/// Errors reported by config validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid listen address '{address}': {reason}")]
    ListenAddress { address: String, reason: String },

    #[error("Invalid metrics path '{0}': must start with '/', must not be '/' and must not contain route captures")]
    MetricsPath(String),

    #[error("Invalid scrape_uri '{uri}': {reason}")]
    ScrapeUri { uri: String, reason: String },

    #[error("scrape_timeout_seconds must be greater than 0")]
    ScrapeTimeout,

    #[error("{0}")]
    Tls(String),
}

/// Exporter configuration. Unset fields fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    #[serde(alias = "telemetry.address", alias = "listen-address")]
    pub listen_address: Option<String>,
    #[serde(alias = "telemetry.endpoint", alias = "metrics-path")]
    pub metrics_path: Option<String>,

    // Upstream
    #[serde(alias = "scrape-uri")]
    pub scrape_uri: Option<String>,
    pub insecure: Option<bool>,
    #[serde(alias = "scrape-timeout-seconds")]
    pub scrape_timeout_seconds: Option<u64>,

    // Logging
    pub log_level: Option<String>,

    // TLS/SSL Configuration
    #[serde(alias = "enable-tls")]
    pub enable_tls: Option<bool>,
    #[serde(alias = "tls-cert-path")]
    pub tls_cert_path: Option<String>,
    #[serde(alias = "tls-key-path")]
    pub tls_key_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: Some(DEFAULT_LISTEN_ADDRESS.to_string()),
            metrics_path: Some(DEFAULT_METRICS_PATH.to_string()),
            scrape_uri: Some(DEFAULT_SCRAPE_URI.to_string()),
            insecure: Some(false),
            scrape_timeout_seconds: None,
            log_level: Some("info".into()),
            enable_tls: Some(false),
            tls_cert_path: None,
            tls_key_path: None,
        }
    }
}

impl Config {
    pub fn listen_address(&self) -> &str {
        self.listen_address
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN_ADDRESS)
    }

    pub fn metrics_path(&self) -> &str {
        self.metrics_path.as_deref().unwrap_or(DEFAULT_METRICS_PATH)
    }

    pub fn scrape_uri(&self) -> &str {
        self.scrape_uri.as_deref().unwrap_or(DEFAULT_SCRAPE_URI)
    }

    pub fn insecure(&self) -> bool {
        self.insecure.unwrap_or(false)
    }

    pub fn scrape_timeout(&self) -> Option<Duration> {
        self.scrape_timeout_seconds.map(Duration::from_secs)
    }
}

/// Resolves a Go-style listen address.
///
/// A bare `:port` binds all IPv4 interfaces only, unlike Go's dual-stack
/// listener. Use `[::]:port` to listen on IPv6 as well.
pub fn resolve_listen_address(address: &str) -> anyhow::Result<SocketAddr> {
    let address = if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address.to_string()
    };

    address
        .to_socket_addrs()
        .with_context(|| format!("cannot resolve '{}'", address))?
        .next()
        .with_context(|| format!("'{}' resolved to no addresses", address))
}

/// Validate effective config (used by --check-config and at startup)
pub fn validate_effective_config(cfg: &Config) -> Result<(), ConfigError> {
    let address = cfg.listen_address();
    resolve_listen_address(address).map_err(|e| ConfigError::ListenAddress {
        address: address.to_string(),
        reason: format!("{:#}", e),
    })?;

    let path = cfg.metrics_path();
    // axum treats these as route captures
    let has_capture =
        path.contains(['{', '}', '*']) || path.split('/').any(|s| s.starts_with(':'));
    if !path.starts_with('/') || path == "/" || has_capture {
        return Err(ConfigError::MetricsPath(path.to_string()));
    }

    let uri = cfg.scrape_uri();
    match reqwest::Url::parse(uri) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => {
            return Err(ConfigError::ScrapeUri {
                uri: uri.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        Err(e) => {
            return Err(ConfigError::ScrapeUri {
                uri: uri.to_string(),
                reason: e.to_string(),
            });
        }
    }

    if cfg.scrape_timeout_seconds == Some(0) {
        return Err(ConfigError::ScrapeTimeout);
    }

    if cfg.enable_tls.unwrap_or(false) {
        validate_tls(cfg.tls_cert_path.as_deref(), cfg.tls_key_path.as_deref())?;
    }

    Ok(())
}

fn validate_tls(cert_path: Option<&str>, key_path: Option<&str>) -> Result<(), ConfigError> {
    let (cert, key) = match (cert_path, key_path) {
        (None, None) => {
            return Err(ConfigError::Tls(
                "TLS is enabled but neither tls_cert_path nor tls_key_path are set".into(),
            ));
        }
        (Some(_), None) => {
            return Err(ConfigError::Tls(
                "TLS is enabled but tls_key_path is not set".into(),
            ));
        }
        (None, Some(_)) => {
            return Err(ConfigError::Tls(
                "TLS is enabled but tls_cert_path is not set".into(),
            ));
        }
        (Some(cert), Some(key)) => (cert, key),
    };

    for (label, file) in [("certificate", cert), ("private key", key)] {
        match fs::metadata(file) {
            Ok(meta) if meta.len() == 0 => {
                return Err(ConfigError::Tls(format!(
                    "TLS {} file is empty: {}",
                    label, file
                )));
            }
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::Tls(format!(
                    "TLS {} file not found: {}",
                    label, file
                )));
            }
            Err(e) => {
                return Err(ConfigError::Tls(format!(
                    "TLS {} file is not readable: {} ({})",
                    label, file, e
                )));
            }
        }
    }

    Ok(())
}

/// Resolves configuration from CLI args, config file, and defaults.
/// This enforces precedence: CLI (if provided) > config file > default.
pub fn resolve_config(args: &Args) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if args.no_config {
        Config::default()
    } else {
        load_config(args.config.as_deref())?
    };

    if let Some(address) = &args.listen_address {
        config.listen_address = Some(address.clone());
    }
    if let Some(path) = &args.metrics_path {
        config.metrics_path = Some(path.clone());
    }
    if let Some(uri) = &args.scrape_uri {
        config.scrape_uri = Some(uri.clone());
    }
    if args.insecure {
        config.insecure = Some(true);
    }
    if let Some(timeout) = args.scrape_timeout {
        config.scrape_timeout_seconds = Some(timeout);
    }

    // TLS configuration: CLI wins if provided
    if args.enable_tls {
        config.enable_tls = Some(true);
    }
    if let Some(cert_path) = &args.tls_cert {
        config.tls_cert_path = Some(cert_path.to_string_lossy().to_string());
    }
    if let Some(key_path) = &args.tls_key {
        config.tls_key_path = Some(key_path.to_string_lossy().to_string());
    }

    Ok(config)
}

/// Loads a config file. Missing files fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let defaults = [
                "/etc/apache-exporter/apache-exporter.yaml",
                "/etc/apache-exporter/apache-exporter.yml",
                "/etc/apache-exporter/apache-exporter.json",
                "/etc/apache-exporter/apache-exporter.toml",
                "./apache-exporter.yaml",
                "./apache-exporter.yml",
                "./apache-exporter.json",
                "./apache-exporter.toml",
            ];

            match defaults.iter().find(|p| Path::new(p).exists()) {
                Some(found) => PathBuf::from(found),
                None => return Ok(Config::default()),
            }
        }
    };

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(&path)?;
    let config = parse_config(&content, path.extension().and_then(|s| s.to_str()))?;
    info!("Loaded configuration from: {}", path.display());
    Ok(config)
}

/// Parses config text; the extension picks the format, YAML otherwise.
pub fn parse_config(
    content: &str,
    extension: Option<&str>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let config = match extension {
        Some("json") => serde_json::from_str(content)?,
        Some("toml") => toml::from_str(content)?,
        _ => serde_yaml::from_str(content)?,
    };
    Ok(config)
}

/// Serializes a config in the requested format.
pub fn render_config(
    config: &Config,
    format: &ConfigFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let output = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)?,
        ConfigFormat::Toml => toml::to_string_pretty(config)?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)?,
    };
    Ok(output)
}

/// Shows configuration in requested format
pub fn show_config(config: &Config, format: ConfigFormat) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_config(config, &format)?);
    Ok(())
}
