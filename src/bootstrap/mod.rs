//! Startup mode resolution.
//!
//! # Data Flow
//! ```text
//! ProxyConfiguration
//!     → selector.rs (governance present?)
//!         no  → rule swap → persist resolver → repository factory → Standard
//!         yes → provider lookup → governance resolver → rule → Governance
//!     → initializer.rs init(config, port)
//!     → listener serves until shutdown
//! ```

pub mod initializer;
pub mod selector;

use thiserror::Error;

use crate::config::ConfigError;
use crate::governance::GovernanceError;
use crate::net::listener::ListenerError;
use crate::persist::PersistError;
use crate::rule::SwapError;

pub use initializer::{
    BootstrapInitializer, GovernanceBootstrapInitializer, StandardBootstrapInitializer,
};
pub use selector::{
    create_bootstrap_initializer, resolve_startup_plan, verify_startup_plan, StartupPlan,
};

/// The two startup topologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupMode {
    Standard,
    Governance,
}

impl std::fmt::Display for StartupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartupMode::Standard => write!(f, "standard"),
            StartupMode::Governance => write!(f, "governance"),
        }
    }
}

/// Any failure that aborts startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Rule(#[from] SwapError),

    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Listener(#[from] ListenerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
