//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfiguration (validated, immutable)
//!     → bootstrap selector (picks Standard or Governance startup)
//! ```
//!
//! # Design Decisions
//! - Config is loaded once per process start and never mutated afterwards
//! - All fields have defaults to allow minimal configs
//! - Rule nodes and the governance section stay untyped until the selector
//!   decides which of them is needed

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, ProxyConfiguration, RuleNode,
    ServerConfiguration,
};
