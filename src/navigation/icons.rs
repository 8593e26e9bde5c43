//! Icon resolution for navigation UI.
//!
//! Icons are either external URLs or names in the SVG sprite catalog,
//! referenced by symbol id (`#icon-<name>`).

use serde::Serialize;
use std::collections::BTreeSet;

use crate::config::IconConfig;
use crate::routing::{KeySpec, MetaConsumer, ResolvedRoute, ICON};

const EXTERNAL_PREFIXES: &[&str] = &["http:", "https:", "mailto:", "tel:"];

/// Whether `path` is an external link rather than an in-app icon or route.
pub fn is_external(path: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// A resolved icon reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "href", rename_all = "lowercase")]
pub enum IconRef {
    External(String),
    Sprite(String),
}

/// Maps `icon` meta values to renderable references.
#[derive(Debug, Clone)]
pub struct IconResolver {
    symbol_prefix: String,
    catalog: BTreeSet<String>,
}

impl IconResolver {
    pub fn new(config: &IconConfig) -> Self {
        Self {
            symbol_prefix: config.symbol_prefix.clone(),
            catalog: config.catalog.iter().cloned().collect(),
        }
    }

    /// Resolve an icon name or URL. Unknown catalog names resolve to `None`.
    pub fn resolve(&self, icon: &str) -> Option<IconRef> {
        if is_external(icon) {
            return Some(IconRef::External(icon.to_string()));
        }
        if !self.catalog.is_empty() && !self.catalog.contains(icon) {
            tracing::warn!(icon, "Icon not in catalog");
            return None;
        }
        Some(IconRef::Sprite(format!("#{}{}", self.symbol_prefix, icon)))
    }

    /// Icon of a resolved route.
    pub fn for_route(&self, route: &ResolvedRoute) -> Option<IconRef> {
        route.get(&ICON).and_then(|icon| self.resolve(&icon))
    }
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new(&IconConfig::default())
    }
}

impl MetaConsumer for IconResolver {
    fn name(&self) -> &'static str {
        "icons"
    }

    fn reads(&self) -> &'static [KeySpec] {
        const READS: &[KeySpec] = &[ICON.spec()];
        READS
    }
}
