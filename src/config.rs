//! Configuration module for the tickspout fixture server.
//!
//! Supports both command-line arguments and TOML configuration file.
//! CLI arguments take precedence over config file values.

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::path::PathBuf;

/// Command-line arguments for the fixture server
#[derive(Parser, Debug)]
#[command(name = "tickspout")]
#[command(author = "tickspout authors")]
#[command(version = "0.1.0")]
#[command(about = "A periodic-emission fixture server", long_about = None)]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Interface to bind to (e.g., 127.0.0.1)
    #[arg(long)]
    pub host: Option<String>,

    /// TCP port to bind to
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Seconds between tick emissions
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Transport to serve (ws or line)
    #[arg(short, long, value_enum)]
    pub transport: Option<TransportType>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Message channel served to connecting clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    /// WebSocket text frames
    Ws,
    /// Newline-delimited text over raw TCP
    Line,
}

/// TOML configuration file structure
#[derive(Debug, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub emitter: EmitterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server-related configuration
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
    /// Transport to serve
    pub transport: Option<TransportType>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            transport: None,
        }
    }
}

/// Emission-related configuration
#[derive(Debug, Deserialize)]
pub struct EmitterConfig {
    /// Seconds between tick emissions
    #[serde(default = "default_interval")]
    pub interval: u64,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_interval() -> u64 {
    5 // seconds
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Final resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub interval: u64,
    pub transport: TransportType,
    pub log_level: String,
}

impl Config {
    /// Load configuration from CLI args and optional TOML file.
    /// CLI arguments take precedence over TOML file values.
    pub fn load() -> Result<Self, ConfigError> {
        let cli = CliArgs::parse();

        // Load TOML config if specified
        let toml_config = if let Some(ref config_path) = cli.config {
            let contents = std::fs::read_to_string(config_path)
                .map_err(|e| ConfigError::FileRead(config_path.clone(), e))?;
            toml::from_str(&contents)
                .map_err(|e| ConfigError::TomlParse(config_path.clone(), e))?
        } else {
            TomlConfig::default()
        };

        Ok(Self::merge(cli, toml_config))
    }

    /// Merge CLI args with TOML config (CLI takes precedence).
    fn merge(cli: CliArgs, toml_config: TomlConfig) -> Self {
        Config {
            host: cli.host.unwrap_or(toml_config.server.host),
            port: cli.port.unwrap_or(toml_config.server.port),
            interval: cli.interval.unwrap_or(toml_config.emitter.interval),
            transport: cli
                .transport
                .or(toml_config.server.transport)
                .unwrap_or(TransportType::Ws),
            log_level: if cli.log_level != "info" {
                cli.log_level
            } else {
                toml_config.logging.level
            },
        }
    }

    /// The socket address string to bind the listener to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration loading errors
#[derive(Debug)]
pub enum ConfigError {
    FileRead(PathBuf, std::io::Error),
    TomlParse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::TomlParse(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TomlConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.transport, None);
        assert_eq!(config.emitter.interval, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            [server]
            host = "0.0.0.0"
            port = 9001
            transport = "line"

            [emitter]
            interval = 2

            [logging]
            level = "debug"
        "#;

        let config: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.transport, Some(TransportType::Line));
        assert_eq!(config.emitter.interval, 2);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_cli_takes_precedence() {
        let cli = CliArgs::parse_from(["tickspout", "--port", "7777", "--interval", "1"]);
        let toml_config: TomlConfig = toml::from_str(
            r#"
            [server]
            port = 9001

            [emitter]
            interval = 30
        "#,
        )
        .unwrap();

        let config = Config::merge(cli, toml_config);
        assert_eq!(config.port, 7777);
        assert_eq!(config.interval, 1);
        // Unset CLI fields fall back to the TOML/default values
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.transport, TransportType::Ws);
    }
}
