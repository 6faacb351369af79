//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Loaded config → Select initializer → init(config, port)
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//!
//! Shutdown (shutdown.rs):
//!     Trigger → Listener stops accepting → Exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Mode resolution finishes before the listener binds

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
