//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → released when the connection is closed
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - The listener binds only after mode resolution succeeded, so a failed
//!   startup never exposes a half-started server

pub mod listener;
