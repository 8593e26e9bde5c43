//! View registry: named view modules bound eagerly or lazily.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::config::RouteConfig;
use crate::views::view::{Component, LoadError, StaticView, View};

/// Maps component identifiers (as used in route configuration) to views.
#[derive(Debug, Clone, Default)]
pub struct ViewRegistry {
    entries: HashMap<String, Component>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view that is available immediately.
    pub fn register_eager(&mut self, id: impl Into<String>, view: Arc<dyn View>) -> &mut Self {
        self.entries.insert(id.into(), Component::Eager(view));
        self
    }

    /// Register a view produced by a deferred loader on first navigation.
    pub fn register_lazy<F, Fut>(&mut self, id: impl Into<String>, load: F) -> &mut Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn View>, LoadError>> + Send + 'static,
    {
        self.entries.insert(id.into(), Component::deferred(load));
        self
    }

    pub fn get(&self, id: &str) -> Option<&Component> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A registry with an eager placeholder view for every component the
    /// configuration references. Used by tooling that inspects a table
    /// without the real view modules.
    pub fn placeholders(routes: &[RouteConfig]) -> Self {
        fn collect(routes: &[RouteConfig], registry: &mut ViewRegistry) {
            for route in routes {
                if let Some(id) = &route.component {
                    if !registry.contains(id) {
                        registry.register_eager(id.clone(), StaticView::shared(id.clone()));
                    }
                }
                collect(&route.children, registry);
            }
        }

        let mut registry = Self::new();
        collect(routes, &mut registry);
        registry
    }
}
