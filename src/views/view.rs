//! View contract shared by eager and deferred components.

use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::routing::ResolvedRoute;

/// What a view sees while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Requested path.
    pub path: &'a str,
    /// Resolved route, `None` when rendering the not-found view.
    pub route: Option<&'a ResolvedRoute>,
}

/// Minimal render tree: one node per view, nested through the outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderNode {
    pub view: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub props: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outlet: Option<Box<RenderNode>>,
}

impl RenderNode {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            props: BTreeMap::new(),
            outlet: None,
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_outlet(mut self, outlet: Option<RenderNode>) -> Self {
        self.outlet = outlet.map(Box::new);
        self
    }

    /// View ids from the outermost node to the innermost.
    pub fn views(&self) -> Vec<&str> {
        let mut views = vec![self.view.as_str()];
        let mut node = self;
        while let Some(inner) = node.outlet.as_deref() {
            views.push(inner.view.as_str());
            node = inner;
        }
        views
    }

    /// The innermost rendered view.
    pub fn leaf_view(&self) -> &str {
        let mut node = self;
        while let Some(inner) = node.outlet.as_deref() {
            node = inner;
        }
        &node.view
    }
}

/// A renderable view module.
pub trait View: Send + Sync + fmt::Debug {
    fn id(&self) -> &str;

    /// Render this view, hosting `outlet` when it is a layout.
    fn render(&self, _ctx: &RenderContext<'_>, outlet: Option<RenderNode>) -> RenderNode {
        RenderNode::new(self.id()).with_outlet(outlet)
    }
}

/// A view with no behavior beyond its identity.
#[derive(Debug, Clone)]
pub struct StaticView {
    id: String,
}

impl StaticView {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn shared(id: impl Into<String>) -> Arc<dyn View> {
        Arc::new(Self::new(id))
    }
}

impl View for StaticView {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A deferred component failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load view `{view}`: {reason}")]
pub struct LoadError {
    pub view: String,
    pub reason: String,
}

impl LoadError {
    pub fn new(view: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            reason: reason.into(),
        }
    }
}

/// Future produced by a deferred loader.
pub type LoadFuture = BoxFuture<'static, Result<Arc<dyn View>, LoadError>>;

/// Zero-argument callable producing a view module asynchronously.
#[derive(Clone)]
pub struct DeferredLoader {
    load: Arc<dyn Fn() -> LoadFuture + Send + Sync>,
}

impl DeferredLoader {
    pub fn new<F, Fut>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn View>, LoadError>> + Send + 'static,
    {
        Self {
            load: Arc::new(move || load().boxed()),
        }
    }

    /// Start a load. Callers are expected to go through the view loader,
    /// which memoizes the result.
    pub fn load(&self) -> LoadFuture {
        (self.load)()
    }
}

impl fmt::Debug for DeferredLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredLoader").finish_non_exhaustive()
    }
}

/// How a route obtains its view: bound eagerly or loaded on first use.
#[derive(Debug, Clone)]
pub enum Component {
    Eager(Arc<dyn View>),
    Deferred(DeferredLoader),
}

impl Component {
    pub fn eager(view: impl View + 'static) -> Self {
        Component::Eager(Arc::new(view))
    }

    pub fn deferred<F, Fut>(load: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Arc<dyn View>, LoadError>> + Send + 'static,
    {
        Component::Deferred(DeferredLoader::new(load))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Component::Deferred(_))
    }
}
