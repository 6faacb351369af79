//! Bootstrap initializers for the two startup modes.

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::bootstrap::{BootstrapError, StartupMode};
use crate::config::ProxyConfiguration;
use crate::governance::GovernanceRule;
use crate::net::listener::Listener;
use crate::persist::{MetadataPersistConfig, MetadataPersistRepository, PersistError};
use crate::rule::RuleKind;

/// Starts the proxy in the selected mode.
#[derive(Debug)]
pub enum BootstrapInitializer {
    Standard(StandardBootstrapInitializer),
    Governance(GovernanceBootstrapInitializer),
}

impl BootstrapInitializer {
    pub fn mode(&self) -> StartupMode {
        match self {
            Self::Standard(_) => StartupMode::Standard,
            Self::Governance(_) => StartupMode::Governance,
        }
    }

    /// Bind the listener on `port`, prepare mode-specific state and serve
    /// until `shutdown` fires. Nothing is persisted if the bind fails.
    pub async fn init(
        self,
        config: &ProxyConfiguration,
        port: u16,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), BootstrapError> {
        let listener = Listener::bind(&config.listener, port).await?;

        match &self {
            Self::Standard(standard) => standard.prepare(config)?,
            Self::Governance(governance) => governance.prepare(),
        }

        tracing::info!(
            mode = %self.mode(),
            address = %listener.local_addr()?,
            "Proxy started"
        );
        listener.serve(shutdown).await?;
        Ok(())
    }
}

/// Standalone startup backed by a metadata persistence repository.
#[derive(Debug)]
pub struct StandardBootstrapInitializer {
    persist_config: MetadataPersistConfig,
    repository: Arc<dyn MetadataPersistRepository>,
}

impl StandardBootstrapInitializer {
    pub fn new(
        persist_config: MetadataPersistConfig,
        repository: Arc<dyn MetadataPersistRepository>,
    ) -> Self {
        Self {
            persist_config,
            repository,
        }
    }

    pub fn persist_config(&self) -> &MetadataPersistConfig {
        &self.persist_config
    }

    pub fn repository(&self) -> &Arc<dyn MetadataPersistRepository> {
        &self.repository
    }

    /// Write the local rules and props to the repository when overwrite is on.
    pub fn prepare(&self, config: &ProxyConfiguration) -> Result<(), PersistError> {
        if !self.persist_config.overwrite {
            tracing::debug!("Metadata overwrite disabled, keeping persisted rules");
            return Ok(());
        }

        for (index, rule) in config.server.rules.iter().enumerate() {
            let tag = RuleKind::from_tag(&rule.kind).map_or(rule.kind.as_str(), |kind| kind.tag());
            let key = format!("/rules/{}-{}", index, tag);
            self.repository.persist(&key, &encode(rule)?)?;
        }
        self.repository
            .persist("/props", &encode(&config.server.props)?)?;

        tracing::info!(
            persist_type = self.repository.type_name(),
            rules = config.server.rules.len(),
            "Persisted local metadata"
        );
        Ok(())
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<String, PersistError> {
    serde_json::to_string(value).map_err(|e| PersistError::Backend(e.to_string()))
}

/// Cluster startup coordinated through the governance rule.
#[derive(Debug)]
pub struct GovernanceBootstrapInitializer {
    rule: GovernanceRule,
}

impl GovernanceBootstrapInitializer {
    pub fn new(rule: GovernanceRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &GovernanceRule {
        &self.rule
    }

    fn prepare(&self) {
        let endpoints: Vec<String> = self.rule.endpoints().iter().map(ToString::to_string).collect();
        tracing::info!(
            instance_id = %self.rule.instance_id(),
            name = %self.rule.config().name,
            registry_type = %self.rule.config().registry_center.registry_type,
            endpoints = ?endpoints,
            overwrite = self.rule.config().overwrite,
            "Joining governance cluster"
        );
    }
}
