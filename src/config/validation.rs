//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (connection limits, log level)
//! - Reject rule nodes without a kind tag
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfiguration → Result<(), Vec<ValidationError>>
//! - The governance section is not inspected here; its shape is checked
//!   only when cluster mode is actually selected

use thiserror::Error;

use crate::config::schema::ProxyConfiguration;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_host must not be empty")]
    EmptyBindHost,

    #[error("listener.max_connections must be greater than zero")]
    ZeroMaxConnections,

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("server.rules[{0}] has an empty type")]
    EmptyRuleKind(usize),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfiguration) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_host.trim().is_empty() {
        errors.push(ValidationError::EmptyBindHost);
    }
    if config.listener.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    for (index, rule) in config.server.rules.iter().enumerate() {
        if rule.kind.trim().is_empty() {
            errors.push(ValidationError::EmptyRuleKind(index));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
