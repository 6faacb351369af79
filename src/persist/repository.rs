//! Metadata persistence repositories and the factory that builds them.

use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::persist::{MetadataPersistConfig, DEFAULT_PERSIST_TYPE};

/// Error type for repository construction and access.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("unsupported metadata persistence type '{0}'")]
    UnsupportedType(String),

    #[error("metadata persistence backend failure: {0}")]
    Backend(String),
}

/// Key/value store for rule and property metadata.
pub trait MetadataPersistRepository: Send + Sync + std::fmt::Debug {
    /// Backend type name this repository was built for.
    fn type_name(&self) -> &str;

    fn persist(&self, key: &str, value: &str) -> Result<(), PersistError>;

    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
}

/// Builds a repository for a resolved persistence config.
pub trait MetadataPersistRepositoryFactory {
    fn new_instance(
        &self,
        config: &MetadataPersistConfig,
    ) -> Result<Arc<dyn MetadataPersistRepository>, PersistError>;
}

/// In-process repository used for the `Local` type.
///
/// An optional `path` property is used as a key prefix so that several
/// proxies sharing one process keep separate metadata.
#[derive(Debug, Default)]
pub struct LocalRepository {
    prefix: String,
    entries: DashMap<String, String>,
}

impl LocalRepository {
    pub fn new(config: &MetadataPersistConfig) -> Self {
        let prefix = config
            .props
            .get("path")
            .map(|path| path.trim_end_matches('/').to_string())
            .unwrap_or_default();

        Self {
            prefix,
            entries: DashMap::new(),
        }
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl MetadataPersistRepository for LocalRepository {
    fn type_name(&self) -> &str {
        DEFAULT_PERSIST_TYPE
    }

    fn persist(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(self.full_key(key), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self
            .entries
            .get(&self.full_key(key))
            .map(|entry| entry.value().clone()))
    }
}

/// Factory knowing the repository types shipped with the proxy.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRepositoryFactory;

impl MetadataPersistRepositoryFactory for DefaultRepositoryFactory {
    fn new_instance(
        &self,
        config: &MetadataPersistConfig,
    ) -> Result<Arc<dyn MetadataPersistRepository>, PersistError> {
        if config.persist_type.eq_ignore_ascii_case(DEFAULT_PERSIST_TYPE) {
            return Ok(Arc::new(LocalRepository::new(config)));
        }
        Err(PersistError::UnsupportedType(config.persist_type.clone()))
    }
}
