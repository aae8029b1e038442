//! Configuration validation.
//!
//! Every key is optional; validation only rejects values that are present
//! and unusable, so an empty config is always valid.

use std::net::SocketAddr;
use std::str::FromStr;

use crate::domain::error::ScannerError;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:3000";
pub const DEFAULT_TIMEOUT_SECS: i64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_TICKER: &str = "AAPL";

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Where daily bars come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Yahoo,
    Csv,
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(SourceKind::Yahoo),
            "csv" => Ok(SourceKind::Csv),
            other => Err(format!("unknown data source '{}' (expected yahoo or csv)", other)),
        }
    }
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> ScannerError {
    ScannerError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

pub fn source_kind(config: &dyn ConfigPort) -> Result<SourceKind, ScannerError> {
    match config.get_string("data", "source") {
        None => Ok(SourceKind::Yahoo),
        Some(s) => s.parse().map_err(|reason: String| invalid("data", "source", reason)),
    }
}

pub fn listen_addr(config: &dyn ConfigPort) -> Result<SocketAddr, ScannerError> {
    let raw = config
        .get_string("web", "listen")
        .unwrap_or_else(|| DEFAULT_LISTEN.to_string());
    raw.trim()
        .parse()
        .map_err(|_| invalid("web", "listen", format!("'{}' is not a socket address", raw)))
}

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    validate_source(config)?;
    validate_timeout(config)?;
    validate_log_level(config)?;
    listen_addr(config)?;
    Ok(())
}

fn validate_source(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    if source_kind(config)? == SourceKind::Csv {
        match config.get_string("data", "csv_dir") {
            Some(dir) if !dir.trim().is_empty() => {}
            _ => return Err(invalid("data", "csv_dir", "csv source requires csv_dir")),
        }
    }
    Ok(())
}

fn validate_timeout(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    let value = config.get_int("yahoo", "timeout_secs", DEFAULT_TIMEOUT_SECS);
    if value <= 0 {
        return Err(invalid("yahoo", "timeout_secs", "timeout_secs must be positive"));
    }
    Ok(())
}

fn validate_log_level(config: &dyn ConfigPort) -> Result<(), ScannerError> {
    if let Some(level) = config.get_string("log", "level") {
        if !LOG_LEVELS.contains(&level.trim().to_lowercase().as_str()) {
            return Err(invalid(
                "log",
                "level",
                format!("'{}' is not one of {}", level, LOG_LEVELS.join(", ")),
            ));
        }
    }
    Ok(())
}
