//! Metadata persistence rule resolution.

use crate::persist::MetadataPersistConfig;
use crate::rule::RuleSet;

/// Resolve the persistence config: the first persistence rule in
/// declaration order, or the Local default when there is none.
pub fn resolve_metadata_persist_config(rules: &RuleSet) -> MetadataPersistConfig {
    match rules.metadata_persist() {
        Some(config) => config.clone(),
        None => {
            tracing::debug!("No metadata persistence rule configured, using Local default");
            MetadataPersistConfig::default()
        }
    }
}
