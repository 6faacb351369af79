//! Governance (cluster coordination) configuration.
//!
//! # Data Flow
//! ```text
//! server.governance (raw table)
//!     → provider.rs (named provider lookup)
//!     → resolver.rs (shape check, typed conversion)
//!     → GovernanceConfig
//!     → rule.rs (GovernanceRule handed to the Governance initializer)
//! ```
//!
//! # Design Decisions
//! - Only runs when the governance section is present
//! - A malformed section is fatal; there is no fallback
//! - Providers are looked up by name; there is no discovery mechanism

pub mod provider;
pub mod resolver;
pub mod rule;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use provider::{
    GovernanceError, GovernanceProvider, GovernanceProviderRegistry, StandardGovernanceProvider,
    DEFAULT_PROVIDER,
};
pub use resolver::{resolve_governance_config, ConfigShapeError};
pub use rule::GovernanceRule;

/// Registry center type used when the section does not name one.
pub const DEFAULT_REGISTRY_TYPE: &str = "ZooKeeper";

/// Typed governance configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct GovernanceConfig {
    /// Logical namespace shared by the cluster.
    pub name: String,

    /// Coordination service connection.
    pub registry_center: RegistryCenterConfig,

    /// Overwrite the shared configuration with the local one on startup.
    pub overwrite: bool,
}

/// Coordination service connection parameters.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RegistryCenterConfig {
    /// Backend type, e.g. "ZooKeeper" or "Etcd".
    #[serde(rename = "type")]
    pub registry_type: String,

    /// Comma-separated `host:port` list.
    pub server_lists: String,

    #[serde(default)]
    pub props: BTreeMap<String, String>,
}
