//! Startup mode selection.
//!
//! # Responsibilities
//! - Decide between standalone and cluster startup from governance presence
//! - Resolve the configuration the chosen mode needs
//! - Build exactly one [`BootstrapInitializer`]
//!
//! # Design Decisions
//! - Governance presence is the only branch condition; rule contents never
//!   influence the mode
//! - Only the resolver for the chosen mode runs
//! - Delegated failures propagate unchanged, nothing is retried

use serde::Serialize;

use crate::bootstrap::initializer::{
    BootstrapInitializer, GovernanceBootstrapInitializer, StandardBootstrapInitializer,
};
use crate::bootstrap::{BootstrapError, StartupMode};
use crate::config::ProxyConfiguration;
use crate::governance::{GovernanceConfig, GovernanceProviderRegistry};
use crate::persist::{
    resolve_metadata_persist_config, MetadataPersistConfig, MetadataPersistRepositoryFactory,
};
use crate::rule::swap_to_rule_configurations;

/// Resolved configuration for the selected startup mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StartupPlan {
    Standard {
        metadata_persist: MetadataPersistConfig,
    },
    Governance {
        provider: String,
        governance: GovernanceConfig,
    },
}

impl StartupPlan {
    pub fn mode(&self) -> StartupMode {
        match self {
            Self::Standard { .. } => StartupMode::Standard,
            Self::Governance { .. } => StartupMode::Governance,
        }
    }
}

/// Resolve the startup plan without building any backend objects.
pub fn resolve_startup_plan(
    config: &ProxyConfiguration,
    providers: &GovernanceProviderRegistry,
) -> Result<StartupPlan, BootstrapError> {
    match &config.server.governance {
        None => {
            let rules = swap_to_rule_configurations(&config.server.rules)?;
            Ok(StartupPlan::Standard {
                metadata_persist: resolve_metadata_persist_config(&rules),
            })
        }
        Some(raw) => {
            let provider = providers.provider_for(raw)?;
            Ok(StartupPlan::Governance {
                provider: provider.name().to_string(),
                governance: provider.resolve_config(raw)?,
            })
        }
    }
}

/// Select and build the initializer for this process.
pub fn create_bootstrap_initializer(
    config: &ProxyConfiguration,
    repositories: &dyn MetadataPersistRepositoryFactory,
    providers: &GovernanceProviderRegistry,
) -> Result<BootstrapInitializer, BootstrapError> {
    let initializer = match resolve_startup_plan(config, providers)? {
        StartupPlan::Standard { metadata_persist } => {
            let repository = repositories.new_instance(&metadata_persist)?;
            tracing::info!(
                persist_type = %metadata_persist.persist_type,
                overwrite = metadata_persist.overwrite,
                "Selected standard startup"
            );
            BootstrapInitializer::Standard(StandardBootstrapInitializer::new(
                metadata_persist,
                repository,
            ))
        }
        StartupPlan::Governance {
            provider,
            governance,
        } => {
            tracing::info!(
                provider = %provider,
                name = %governance.name,
                registry_type = %governance.registry_center.registry_type,
                "Selected governance startup"
            );
            let rule = providers.get(&provider)?.build_rule(governance)?;
            BootstrapInitializer::Governance(GovernanceBootstrapInitializer::new(rule))
        }
    };

    Ok(initializer)
}

/// Resolve the startup plan and run the builders for it, dropping the
/// result. Catches the failures `create_bootstrap_initializer` would hit
/// (unsupported persist type, unparsable server lists) without binding.
pub fn verify_startup_plan(
    config: &ProxyConfiguration,
    repositories: &dyn MetadataPersistRepositoryFactory,
    providers: &GovernanceProviderRegistry,
) -> Result<StartupPlan, BootstrapError> {
    let plan = resolve_startup_plan(config, providers)?;
    create_bootstrap_initializer(config, repositories, providers)?;
    Ok(plan)
}
