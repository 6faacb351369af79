//! Metadata persistence for standalone mode.
//!
//! # Data Flow
//! ```text
//! RuleSet
//!     → resolver.rs (first metadata_persist rule, or the Local default)
//!     → MetadataPersistConfig
//!     → repository.rs factory (keyed by persist_type)
//!     → Arc<dyn MetadataPersistRepository>
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; a missing rule means a local single node
//! - Only the first persistence rule counts, later ones are ignored

pub mod repository;
pub mod resolver;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use repository::{
    DefaultRepositoryFactory, LocalRepository, MetadataPersistRepository,
    MetadataPersistRepositoryFactory, PersistError,
};
pub use resolver::resolve_metadata_persist_config;

/// Backend type used when no persistence rule is configured.
pub const DEFAULT_PERSIST_TYPE: &str = "Local";

/// Configuration of the metadata persistence backend.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct MetadataPersistConfig {
    /// Backend type name, e.g. "Local" or "ZooKeeper".
    pub persist_type: String,

    /// Overwrite stored metadata with the local configuration on startup.
    #[serde(default)]
    pub overwrite: bool,

    /// Backend-specific properties.
    #[serde(default)]
    pub props: BTreeMap<String, String>,
}

impl Default for MetadataPersistConfig {
    fn default() -> Self {
        Self {
            persist_type: DEFAULT_PERSIST_TYPE.to_string(),
            overwrite: true,
            props: BTreeMap::new(),
        }
    }
}
