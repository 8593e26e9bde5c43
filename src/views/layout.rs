//! Layout wrapper and render composition.
//!
//! # Data Flow
//! ```text
//! matched chain (root → leaf) with loaded views
//!     → render leaf first
//!     → each outer view receives the inner result as its outlet
//!     → LayoutView adds the shell chrome around the outlet
//! ```
//!
//! A layout matched on its own (no child) never gets here with an empty
//! outlet when it declares a default redirect: the matcher already
//! re-resolved against the redirect target.

use std::sync::Arc;

use crate::routing::TITLE;
use crate::views::view::{RenderContext, RenderNode, View};

/// Structural shell that every nested route renders inside.
#[derive(Debug, Clone)]
pub struct LayoutView {
    id: String,
    app_title: String,
}

impl LayoutView {
    pub fn new(id: impl Into<String>, app_title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            app_title: app_title.into(),
        }
    }
}

impl View for LayoutView {
    fn id(&self) -> &str {
        &self.id
    }

    fn render(&self, ctx: &RenderContext<'_>, outlet: Option<RenderNode>) -> RenderNode {
        let mut node = RenderNode::new(&self.id)
            .with_prop("app", &self.app_title)
            .with_prop("path", ctx.path);
        if let Some(title) = ctx.route.and_then(|r| r.meta.get(&TITLE)) {
            node = node.with_prop("heading", title);
        }
        node.with_outlet(outlet)
    }
}

/// Compose the views of a matched chain into a single render tree.
///
/// `views` is ordered root→leaf; `None` entries are routes without a
/// component and pass their outlet through unchanged.
pub fn compose(views: &[Option<Arc<dyn View>>], ctx: &RenderContext<'_>) -> Option<RenderNode> {
    views.iter().rev().fold(None, |outlet, view| match view {
        Some(view) => Some(view.render(ctx, outlet)),
        None => outlet,
    })
}
