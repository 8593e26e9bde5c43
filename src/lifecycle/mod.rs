//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validate config → Compile route table → [development] run hooks
//!     → Construct router → Navigate to initial path (mount)
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then routes, then hooks, then render
//! - Nothing renders before every development hook has completed

pub mod startup;

pub use startup::{BootstrapError, Shell, ShellBuilder};
