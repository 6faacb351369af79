//! Observability subsystem.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Pretty format for development, JSON for log aggregation
//! - `RUST_LOG` overrides the configured level

pub mod logging;
