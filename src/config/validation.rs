//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{AppConfig, StorageBackend};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("env must not be empty")]
    EmptyEnv,

    #[error("http_server.address {0:?} must be host:port")]
    InvalidAddress(String),

    #[error("storage.path must not be empty for the sqlite backend")]
    EmptyStoragePath,

    #[error("observability.log_level {0:?} is not one of trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Check the semantic constraints of a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.env.trim().is_empty() {
        errors.push(ValidationError::EmptyEnv);
    }

    if !is_host_port(&config.http_server.address) {
        errors.push(ValidationError::InvalidAddress(
            config.http_server.address.clone(),
        ));
    }

    if config.storage.backend == StorageBackend::Sqlite && config.storage.path.trim().is_empty() {
        errors.push(ValidationError::EmptyStoragePath);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_host_port(address: &str) -> bool {
    match address.rsplit_once(':') {
        Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_test_config_is_valid() {
        assert!(validate_config(&AppConfig::for_address("127.0.0.1:0")).is_ok());
    }

    #[test]
    fn test_address_forms() {
        assert!(is_host_port("localhost:8082"));
        assert!(is_host_port("[::1]:8080"));
        assert!(!is_host_port(":8080"));
        assert!(!is_host_port("localhost"));
        assert!(!is_host_port("localhost:http"));
        assert!(!is_host_port("localhost:70000"));
    }

    #[test]
    fn test_sqlite_requires_path() {
        let mut config = AppConfig::for_address("127.0.0.1:0");
        config.storage.backend = StorageBackend::Sqlite;
        config.storage.path = String::new();

        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptyStoragePath])
        );
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = AppConfig::for_address("127.0.0.1:0");
        config.observability.log_level = "verbose".to_string();

        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::InvalidLogLevel("verbose".to_string())])
        );
    }
}
