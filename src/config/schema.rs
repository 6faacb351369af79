//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! Rule nodes and the governance section are kept generic here; typed
//! conversion happens in `rule::swapper` and `governance::resolver`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy, as loaded from disk.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfiguration {
    /// Listener configuration (bind host, port, limits).
    pub listener: ListenerConfig,

    /// Server-wide rules, governance and properties.
    pub server: ServerConfiguration,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfiguration {
    /// Whether the governance section is present.
    pub fn has_governance(&self) -> bool {
        self.server.governance.is_some()
    }
}

/// Server configuration: the part that decides the startup mode.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServerConfiguration {
    /// Rule nodes in declaration order.
    pub rules: Vec<RuleNode>,

    /// Raw governance section. Presence selects cluster mode.
    pub governance: Option<toml::Table>,

    /// Free-form server properties.
    pub props: BTreeMap<String, String>,
}

/// A generic rule node: a `type` tag plus an untyped body.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RuleNode {
    /// Rule kind tag, e.g. `sharding` or `metadata_persist`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Remaining fields of the node.
    #[serde(flatten)]
    pub body: toml::Table,
}

impl RuleNode {
    pub fn new(kind: impl Into<String>, body: toml::Table) -> Self {
        Self {
            kind: kind.into(),
            body,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host to bind (e.g., "0.0.0.0").
    pub bind_host: String,

    /// Port to bind. Overridden by the command-line port when given.
    pub port: u16,

    /// Maximum concurrent client connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3307,
            max_connections: 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// Structured JSON for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Output format for log events.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}
