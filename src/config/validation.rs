//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and formats (paths, URLs, log levels)
//! - Route-level checks that need no view registry (empty paths, names)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShellConfig → Result<(), Vec<ValidationError>>
//! - Route table semantics (redirects, uniqueness) are checked when the
//!   table is compiled, since they need compiled patterns

use thiserror::Error;
use url::Url;

use crate::config::schema::{RouteConfig, ShellConfig};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const PROXY_SCHEMES: &[&str] = &["http", "https", "ws", "wss"];

/// A semantic problem in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown log level `{0}`")]
    LogLevel(String),

    #[error("`{field}` must start and end with `/`, got `{value}`")]
    PublicPath { field: &'static str, value: String },

    #[error("`{0}` must not be empty")]
    Empty(&'static str),

    #[error("initial path `{0}` must be absolute")]
    InitialPath(String),

    #[error("proxy `{prefix}` has invalid target `{target}`")]
    ProxyTarget { prefix: String, target: String },

    #[error("route `{0}` has an empty name")]
    EmptyRouteName(String),

    #[error("top-level route `{0}` must have an absolute path")]
    RelativeTopLevel(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ShellConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.app.title.trim().is_empty() {
        errors.push(ValidationError::Empty("app.title"));
    }
    if !config.app.initial_path.starts_with('/') {
        errors.push(ValidationError::InitialPath(config.app.initial_path.clone()));
    }

    let public_path = &config.build.production_public_path;
    if !public_path.starts_with('/') || !public_path.ends_with('/') {
        errors.push(ValidationError::PublicPath {
            field: "build.production_public_path",
            value: public_path.clone(),
        });
    }
    if config.build.output_dir.trim().is_empty() {
        errors.push(ValidationError::Empty("build.output_dir"));
    }
    if config.build.index_path.trim().is_empty() {
        errors.push(ValidationError::Empty("build.index_path"));
    }

    for (prefix, rule) in &config.build.dev_server.proxy {
        let valid = Url::parse(&rule.target)
            .map(|url| PROXY_SCHEMES.contains(&url.scheme()) && url.has_host())
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::ProxyTarget {
                prefix: prefix.clone(),
                target: rule.target.clone(),
            });
        }
    }

    for route in &config.routes {
        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativeTopLevel(route.path.clone()));
        }
        validate_route(route, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_route(route: &RouteConfig, errors: &mut Vec<ValidationError>) {
    if matches!(&route.name, Some(name) if name.trim().is_empty()) {
        errors.push(ValidationError::EmptyRouteName(route.path.clone()));
    }
    for child in &route.children {
        validate_route(child, errors);
    }
}
