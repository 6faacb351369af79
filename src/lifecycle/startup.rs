//! Startup orchestration.
//!
//! # Responsibilities
//! - Select the initializer for the loaded configuration
//! - Hook termination signals to shutdown
//! - Run the initializer until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listeners start last (traffic only when the mode is fully resolved)

use crate::bootstrap::{create_bootstrap_initializer, BootstrapError};
use crate::config::ProxyConfiguration;
use crate::governance::GovernanceProviderRegistry;
use crate::lifecycle::{signals, Shutdown};
use crate::persist::DefaultRepositoryFactory;

/// Start the proxy with the built-in repository factory and providers and
/// run until a termination signal arrives.
pub async fn start(config: ProxyConfiguration, port: u16) -> Result<(), BootstrapError> {
    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());
    run(config, port, shutdown).await
}

/// Select the initializer and run it until `shutdown` is triggered.
pub async fn run(
    config: ProxyConfiguration,
    port: u16,
    shutdown: Shutdown,
) -> Result<(), BootstrapError> {
    let initializer = create_bootstrap_initializer(
        &config,
        &DefaultRepositoryFactory,
        &GovernanceProviderRegistry::with_defaults(),
    )?;

    initializer.init(&config, port, shutdown.subscribe()).await
}
