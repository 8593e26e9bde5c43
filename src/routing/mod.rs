//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     RouteDefinition[] / RouteConfig[]
//!     → table.rs (compile patterns, bind components, validate)
//!     → Freeze as immutable RouteTable
//!
//! Navigation (per URL):
//!     path
//!     → matcher.rs (walk siblings in order, follow redirects)
//!     → meta.rs (merge meta root → leaf)
//!     → Return: ResolvedRoute or NotFound
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - No regex in the matcher (static, parameter and catch-all segments)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod error;
pub mod matcher;
pub mod meta;
pub mod pattern;
pub mod resolved;
pub mod table;

pub use error::{LookupError, RouteIssue, RouteTableError};
pub use matcher::{MatchOutcome, Matcher};
pub use meta::{KeySpec, MetaConsumer, MetaKey, MetaKind, RouteMeta, AFFIX, ICON, TITLE};
pub use pattern::{PathParams, PathPattern};
pub use resolved::{ResolvedRoute, RouteId};
pub use table::{MetaIssue, RouteDefinition, RouteRecord, RouteTable};
