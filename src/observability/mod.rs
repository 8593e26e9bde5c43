//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges)
//!
//! Consumers:
//!     → Log output (stdout)
//!     → Any metrics recorder installed by the host application
//! ```
//!
//! # Design Decisions
//! - Structured logging with fields, not formatted strings
//! - Navigation ids flow through commit logs
//! - Metrics are cheap (no-op without a recorder)

pub mod logging;
pub mod metrics;
