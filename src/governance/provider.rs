//! Named governance providers.
//!
//! A provider turns the raw governance section into a [`GovernanceRule`].
//! The section may pick one with `provider = "<name>"`; otherwise
//! [`DEFAULT_PROVIDER`] is used.

use std::collections::HashMap;

use thiserror::Error;

use crate::governance::{resolve_governance_config, ConfigShapeError, GovernanceConfig, GovernanceRule};

/// Provider used when the section does not name one.
pub const DEFAULT_PROVIDER: &str = "Standard";

/// Error type for governance resolution.
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("unknown governance provider '{0}'")]
    UnknownProvider(String),

    #[error("governance.provider must be a string")]
    InvalidProviderName,

    #[error("invalid governance configuration: {0}")]
    Shape(#[from] ConfigShapeError),

    #[error("invalid registry center server '{0}', expected host:port")]
    InvalidServerList(String),
}

/// Resolves governance config and builds the governance rule.
pub trait GovernanceProvider: Send + Sync {
    fn name(&self) -> &str;

    fn resolve_config(&self, raw: &toml::Table) -> Result<GovernanceConfig, GovernanceError>;

    fn build_rule(&self, config: GovernanceConfig) -> Result<GovernanceRule, GovernanceError>;
}

/// The built-in provider.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardGovernanceProvider;

impl GovernanceProvider for StandardGovernanceProvider {
    fn name(&self) -> &str {
        DEFAULT_PROVIDER
    }

    fn resolve_config(&self, raw: &toml::Table) -> Result<GovernanceConfig, GovernanceError> {
        Ok(resolve_governance_config(raw)?)
    }

    fn build_rule(&self, config: GovernanceConfig) -> Result<GovernanceRule, GovernanceError> {
        GovernanceRule::new(config)
    }
}

/// Providers keyed by case-insensitive name.
pub struct GovernanceProviderRegistry {
    providers: HashMap<String, Box<dyn GovernanceProvider>>,
}

impl GovernanceProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// A registry holding the built-in provider.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(StandardGovernanceProvider);
        registry
    }

    /// Add a provider, replacing any with the same name.
    pub fn register<P: GovernanceProvider + 'static>(&mut self, provider: P) {
        self.providers
            .insert(provider.name().to_ascii_lowercase(), Box::new(provider));
    }

    pub fn get(&self, name: &str) -> Result<&dyn GovernanceProvider, GovernanceError> {
        self.providers
            .get(&name.to_ascii_lowercase())
            .map(|provider| &**provider)
            .ok_or_else(|| GovernanceError::UnknownProvider(name.to_string()))
    }

    /// The provider selected by a raw governance section.
    pub fn provider_for(&self, raw: &toml::Table) -> Result<&dyn GovernanceProvider, GovernanceError> {
        match raw.get("provider") {
            Some(toml::Value::String(name)) => self.get(name),
            Some(_) => Err(GovernanceError::InvalidProviderName),
            None => self.get(DEFAULT_PROVIDER),
        }
    }
}

impl Default for GovernanceProviderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
