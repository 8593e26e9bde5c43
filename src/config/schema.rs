//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the shell.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::navigation::HistoryMode;
use crate::routing::RouteMeta;

/// Root configuration for the admin shell.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShellConfig {
    /// Application identity and runtime mode.
    pub app: AppConfig,

    /// Route table, in priority order.
    pub routes: Vec<RouteConfig>,

    /// Icon catalog used by navigation UI.
    pub icons: IconConfig,

    /// Packaging settings (do not affect routing).
    pub build: BuildConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Application settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application title, shown in the layout and page titles.
    pub title: String,

    pub environment: Environment,

    /// How locations are read from and written to the browser URL.
    pub history: HistoryMode,

    /// Path the shell is entered on.
    pub initial_path: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Admin".to_string(),
            environment: Environment::Development,
            history: HistoryMode::Hash,
            initial_path: "/".to_string(),
        }
    }
}

/// One route definition. Children nest recursively.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Absolute (`/x`) or relative to the parent (`x`).
    pub path: String,

    /// Unique name for programmatic navigation.
    #[serde(default)]
    pub name: Option<String>,

    /// Component id, looked up in the view registry.
    #[serde(default)]
    pub component: Option<String>,

    /// Redirect target used when this route is the exact match.
    #[serde(default)]
    pub redirect: Option<String>,

    /// Navigation hints (title, icon, affix, ...).
    #[serde(default)]
    pub meta: RouteMeta,

    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

/// Icon catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IconConfig {
    /// Prefix of sprite symbol ids (`icon-` gives `#icon-dashboard`).
    pub symbol_prefix: String,

    /// Known icon names. Empty means any name is accepted.
    pub catalog: Vec<String>,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            symbol_prefix: "icon-".to_string(),
            catalog: Vec::new(),
        }
    }
}

/// Packaging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Base URL in production deployments.
    pub production_public_path: String,

    /// Output directory for production bundles.
    pub output_dir: String,

    /// Static asset directory, relative to `output_dir`.
    pub assets_dir: String,

    /// Generated index file, relative to `output_dir`.
    pub index_path: String,

    /// Include content hashes in asset file names.
    pub filename_hashing: bool,

    /// Development server settings.
    pub dev_server: DevServerConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            production_public_path: "/production-sub-path/".to_string(),
            output_dir: "dist".to_string(),
            assets_dir: String::new(),
            index_path: "index.html".to_string(),
            filename_hashing: true,
            dev_server: DevServerConfig::default(),
        }
    }
}

/// Development server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DevServerConfig {
    /// Path prefix → upstream API server.
    pub proxy: BTreeMap<String, ProxyRule>,
}

/// Upstream a development path prefix is proxied to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProxyRule {
    pub target: String,

    /// Proxy websocket upgrades as well.
    #[serde(default)]
    pub ws: bool,

    /// Rewrite the Host header to the target's.
    #[serde(default)]
    pub change_origin: bool,
}

/// Build settings with environment-dependent values resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedBuild {
    pub environment: Environment,
    pub public_path: String,
    pub output_dir: String,
    pub assets_dir: String,
    pub index_path: String,
    pub filename_hashing: bool,
    pub lint_on_save: bool,
    pub source_maps: bool,
    pub extract_css: bool,
    pub proxy: BTreeMap<String, ProxyRule>,
}

impl BuildConfig {
    /// Resolve the values that differ between development and production.
    pub fn resolve(&self, environment: Environment) -> ResolvedBuild {
        let production = environment.is_production();
        ResolvedBuild {
            environment,
            public_path: if production {
                self.production_public_path.clone()
            } else {
                "/".to_string()
            },
            output_dir: self.output_dir.clone(),
            assets_dir: self.assets_dir.clone(),
            index_path: self.index_path.clone(),
            filename_hashing: self.filename_hashing,
            lint_on_save: !production,
            source_maps: !production,
            extract_css: production,
            proxy: if production {
                BTreeMap::new()
            } else {
                self.dev_server.proxy.clone()
            },
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
