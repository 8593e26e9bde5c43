//! Match results.

use serde::Serialize;

use crate::routing::meta::{MetaKey, MetaValue, RouteMeta, TITLE};
use crate::routing::pattern::PathParams;

/// Stable identifier of a compiled route (its pre-order position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RouteId(pub usize);

impl From<usize> for RouteId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Result of matching a path against the route table.
///
/// Redirect provenance and query strings live on the navigation, so
/// resolving a redirecting path yields a value equal to resolving its
/// target directly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    /// Final path after redirects.
    pub path: String,
    /// Matched chain, root first.
    pub matched: Vec<RouteId>,
    /// Name of the leaf route, if it has one.
    pub name: Option<String>,
    /// Meta merged root→leaf.
    pub meta: RouteMeta,
    pub params: PathParams,
}

impl ResolvedRoute {
    /// The innermost matched route.
    pub fn leaf(&self) -> Option<RouteId> {
        self.matched.last().copied()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn get<T: MetaValue>(&self, key: &MetaKey<T>) -> Option<T> {
        self.meta.get(key)
    }

    pub fn title(&self) -> Option<String> {
        self.meta.get(&TITLE)
    }
}
