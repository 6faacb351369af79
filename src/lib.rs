//! Database sharding proxy: startup mode resolution and bootstrap.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod governance;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod persist;
pub mod rule;

pub use bootstrap::{create_bootstrap_initializer, BootstrapError, BootstrapInitializer};
pub use config::ProxyConfiguration;
pub use lifecycle::Shutdown;
