//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument
//! parsing and service configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_PORT, DEFAULT_USER_AGENT, MAX_REDIRECT_HOPS, MAX_TOTAL_TIME_MS, REQUEST_TIMEOUT_MS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to
/// most verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Service configuration.
///
/// Parsed from the command line by the binary; can also be constructed
/// programmatically (`Config::default()`) when embedding the resolver.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hopguard",
    version,
    about = "Guarded HTTP redirect-resolution service with per-hop SSRF protection"
)]
pub struct Config {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Maximum number of redirect hops to follow per resolution
    #[arg(long, default_value_t = MAX_REDIRECT_HOPS)]
    pub max_hops: usize,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = REQUEST_TIMEOUT_MS)]
    pub request_timeout_ms: u64,

    /// Overall per-resolution time budget in milliseconds
    #[arg(long, default_value_t = MAX_TOTAL_TIME_MS)]
    pub total_budget_ms: u64,

    /// HTTP User-Agent header value for outbound hop requests
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Additional address prefix to treat as private and block (repeatable).
    /// Prefixes containing ':' extend the IPv6 rules, all others the IPv4
    /// rules (e.g. --block-prefix 100.64.).
    #[arg(long = "block-prefix", value_name = "PREFIX")]
    pub block_prefixes: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            max_hops: MAX_REDIRECT_HOPS,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            total_budget_ms: MAX_TOTAL_TIME_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            block_prefixes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.max_hops, 10);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.total_budget_ms, 25_000);
        assert!(config.block_prefixes.is_empty());
    }

    #[test]
    fn test_config_parses_cli_overrides() {
        let config = Config::parse_from([
            "hopguard",
            "--port",
            "9090",
            "--max-hops",
            "5",
            "--block-prefix",
            "100.64.",
            "--block-prefix",
            "fec0",
        ]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.max_hops, 5);
        assert_eq!(config.block_prefixes, vec!["100.64.", "fec0"]);
    }
}
