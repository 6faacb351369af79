//! Shared fixtures for bootstrap integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sharding_proxy::config::{parse_config, ProxyConfiguration};
use sharding_proxy::governance::{
    resolve_governance_config, GovernanceConfig, GovernanceError, GovernanceProvider,
    GovernanceRule, DEFAULT_PROVIDER,
};
use sharding_proxy::persist::{
    LocalRepository, MetadataPersistConfig, MetadataPersistRepository,
    MetadataPersistRepositoryFactory, PersistError,
};

/// Parse a TOML config, panicking on error.
pub fn config(text: &str) -> ProxyConfiguration {
    parse_config(text).unwrap()
}

/// Repository factory accepting any type and recording what it was given.
#[derive(Default, Clone)]
pub struct RecordingFactory {
    pub seen: Arc<Mutex<Vec<MetadataPersistConfig>>>,
}

impl RecordingFactory {
    pub fn calls(&self) -> Vec<MetadataPersistConfig> {
        self.seen.lock().unwrap().clone()
    }
}

impl MetadataPersistRepositoryFactory for RecordingFactory {
    fn new_instance(
        &self,
        config: &MetadataPersistConfig,
    ) -> Result<Arc<dyn MetadataPersistRepository>, PersistError> {
        self.seen.lock().unwrap().push(config.clone());
        Ok(Arc::new(LocalRepository::new(config)))
    }
}

/// Standard governance provider that counts resolutions.
#[derive(Default, Clone)]
pub struct CountingProvider {
    pub resolved: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl CountingProvider {
    pub fn count(&self) -> usize {
        self.resolved.load(Ordering::SeqCst)
    }
}

impl GovernanceProvider for CountingProvider {
    fn name(&self) -> &str {
        DEFAULT_PROVIDER
    }

    fn resolve_config(&self, raw: &toml::Table) -> Result<GovernanceConfig, GovernanceError> {
        self.resolved.fetch_add(1, Ordering::SeqCst);
        Ok(resolve_governance_config(raw)?)
    }

    fn build_rule(&self, config: GovernanceConfig) -> Result<GovernanceRule, GovernanceError> {
        GovernanceRule::new(config)
    }
}
