//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ShellConfig (validated, immutable)
//!     → routes handed to RouteTable::from_config at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the route table is never mutated
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AppConfig, BuildConfig, DevServerConfig, Environment, IconConfig, ObservabilityConfig,
    ProxyRule, ResolvedBuild, RouteConfig, ShellConfig,
};
pub use validation::{validate_config, ValidationError};
