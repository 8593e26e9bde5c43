//! View subsystem.
//!
//! # Data Flow
//! ```text
//! ViewRegistry (component id → eager view | deferred loader)
//!     → bound into RouteTable records at startup
//!
//! On navigation, for each matched record:
//!     → loader.rs (eager: immediate, deferred: load once, then cache)
//!     → layout.rs (compose leaf inside its layouts)
//!     → RenderNode tree
//! ```
//!
//! # Design Decisions
//! - Loading is the only suspension point of a navigation
//! - Load failures are a distinct error kind, never retried automatically

pub mod layout;
pub mod loader;
pub mod registry;
pub mod view;

pub use layout::{compose, LayoutView};
pub use loader::{LoadState, ViewLoader};
pub use registry::ViewRegistry;
pub use view::{Component, DeferredLoader, LoadError, RenderContext, RenderNode, StaticView, View};
