//! Navigation engine.
//!
//! # Responsibilities
//! - Match the requested location against the route table
//! - Load the views of the matched chain (the only suspension point)
//! - Commit the result unless a newer navigation was started meanwhile
//! - Publish the active navigation to listeners
//!
//! # Design Decisions
//! - Explicitly constructed and owned by the application root, no global
//! - Latest navigation wins: each call takes a ticket, stale results are
//!   dropped at commit time while their cache entries are kept
//! - A miss renders the not-found view, it is not an error
//! - Load failures are returned to the caller, never retried here

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use uuid::Uuid;

use crate::navigation::error::NavigationError;
use crate::navigation::location::Location;
use crate::observability::metrics;
use crate::routing::{MatchOutcome, Matcher, PathParams, ResolvedRoute, RouteTable};
use crate::views::{compose, RenderContext, RenderNode, StaticView, View, ViewLoader};

/// Id of the built-in not-found view.
pub const NOT_FOUND_VIEW: &str = "not-found";

/// A committed navigation: what is currently on screen.
#[derive(Debug, Clone, Serialize)]
pub struct Navigation {
    pub id: Uuid,
    pub location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirected_from: Option<String>,
    /// `None` when nothing matched.
    pub route: Option<ResolvedRoute>,
    pub rendered: RenderNode,
}

impl Navigation {
    pub fn is_not_found(&self) -> bool {
        self.route.is_none()
    }

    pub fn path(&self) -> &str {
        self.route
            .as_ref()
            .map(|r| r.path.as_str())
            .unwrap_or(&self.location.path)
    }
}

/// How a navigation ended.
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// A route matched and its views are now active.
    Committed(Arc<Navigation>),
    /// Nothing matched; the not-found view is now active.
    NotFound(Arc<Navigation>),
    /// A newer navigation started before this one finished.
    Superseded { target: String },
}

impl NavigationOutcome {
    pub fn navigation(&self) -> Option<&Arc<Navigation>> {
        match self {
            NavigationOutcome::Committed(nav) | NavigationOutcome::NotFound(nav) => Some(nav),
            NavigationOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationOutcome::Superseded { .. })
    }

    fn label(&self) -> &'static str {
        match self {
            NavigationOutcome::Committed(_) => "committed",
            NavigationOutcome::NotFound(_) => "not_found",
            NavigationOutcome::Superseded { .. } => "superseded",
        }
    }
}

/// The shell router.
pub struct Router {
    table: Arc<RouteTable>,
    loader: ViewLoader,
    not_found: Arc<dyn View>,
    latest: AtomicU64,
    active: watch::Sender<Option<Arc<Navigation>>>,
}

impl Router {
    pub fn new(table: Arc<RouteTable>) -> Self {
        let (active, _) = watch::channel(None);
        Self {
            table,
            loader: ViewLoader::new(),
            not_found: StaticView::shared(NOT_FOUND_VIEW),
            latest: AtomicU64::new(0),
            active,
        }
    }

    /// Replace the view rendered when nothing matches.
    pub fn with_not_found(mut self, view: Arc<dyn View>) -> Self {
        self.not_found = view;
        self
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn loader(&self) -> &ViewLoader {
        &self.loader
    }

    /// The navigation currently on screen.
    pub fn current(&self) -> Option<Arc<Navigation>> {
        self.active.borrow().clone()
    }

    /// Listen for committed navigations (sidebar, tab strip, title, ...).
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<Navigation>>> {
        self.active.subscribe()
    }

    /// Match a target without loading or committing anything.
    pub fn resolve(&self, target: &str) -> Result<MatchOutcome, NavigationError> {
        let location = Location::parse(target)?;
        Ok(Matcher::new(&self.table).match_path(&location.path))
    }

    /// Navigate to a named route.
    pub async fn navigate_named(
        &self,
        name: &str,
        params: &PathParams,
    ) -> Result<NavigationOutcome, NavigationError> {
        let target = self.table.href(name, params)?;
        self.navigate(&target).await
    }

    /// Navigate to `target`.
    pub async fn navigate(&self, target: &str) -> Result<NavigationOutcome, NavigationError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let location = Location::parse(target)?;

        let outcome = match Matcher::new(&self.table).match_path(&location.path) {
            MatchOutcome::NotFound => {
                tracing::info!(path = %location.path, "No route matched");
                let ctx = RenderContext {
                    path: &location.path,
                    route: None,
                };
                let rendered = self.not_found.render(&ctx, None);
                let navigation = Arc::new(Navigation {
                    id: Uuid::new_v4(),
                    location,
                    redirected_from: None,
                    route: None,
                    rendered,
                });
                self.commit(ticket, navigation, NavigationOutcome::NotFound)
            }
            MatchOutcome::Matched {
                route,
                redirected_from,
            } => {
                let mut views = Vec::with_capacity(route.matched.len());
                for id in &route.matched {
                    let Some(record) = self.table.get(*id) else {
                        continue;
                    };
                    let view = self.loader.resolve(record).await.map_err(|source| {
                        metrics::record_navigation("load_failed");
                        NavigationError::Load {
                            route: record.display_name(),
                            source,
                        }
                    })?;
                    views.push(view);
                }

                let ctx = RenderContext {
                    path: &route.path,
                    route: Some(&route),
                };
                let rendered = compose(&views, &ctx)
                    .unwrap_or_else(|| RenderNode::new(route.name.clone().unwrap_or_default()));
                let navigation = Arc::new(Navigation {
                    id: Uuid::new_v4(),
                    location,
                    redirected_from,
                    route: Some(route),
                    rendered,
                });
                self.commit(ticket, navigation, NavigationOutcome::Committed)
            }
        };

        metrics::record_navigation(outcome.label());
        Ok(outcome)
    }

    /// Publish `navigation` if `ticket` is still the latest navigation.
    fn commit(
        &self,
        ticket: u64,
        navigation: Arc<Navigation>,
        wrap: fn(Arc<Navigation>) -> NavigationOutcome,
    ) -> NavigationOutcome {
        let committed = self.active.send_if_modified(|active| {
            if self.latest.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *active = Some(navigation.clone());
            true
        });

        if committed {
            tracing::info!(
                id = %navigation.id,
                path = %navigation.path(),
                redirected_from = ?navigation.redirected_from,
                view = %navigation.rendered.leaf_view(),
                "Navigation committed"
            );
            wrap(navigation)
        } else {
            tracing::debug!(path = %navigation.location.path, ticket, "Stale navigation dropped");
            NavigationOutcome::Superseded {
                target: navigation.location.full_path(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteDefinition;
    use crate::views::{Component, LayoutView};

    fn router() -> Router {
        let table = RouteTable::new(vec![
            RouteDefinition::new("/")
                .view(Arc::new(LayoutView::new("layout", "Admin")))
                .redirect("/dashboard")
                .child(
                    RouteDefinition::new("dashboard")
                        .name("Dashboard")
                        .component(Component::deferred(|| async { Ok(StaticView::shared("dashboard")) }))
                        .meta("title", "Dashboard"),
                ),
        ])
        .unwrap();
        Router::new(Arc::new(table))
    }

    #[tokio::test]
    async fn test_navigate_renders_inside_layout() {
        let router = router();
        let outcome = router.navigate("/").await.unwrap();
        let nav = outcome.navigation().unwrap();

        assert!(matches!(outcome, NavigationOutcome::Committed(_)));
        assert_eq!(nav.rendered.views(), vec!["layout", "dashboard"]);
        assert_eq!(nav.redirected_from.as_deref(), Some("/"));
        assert_eq!(nav.path(), "/dashboard");
        assert_eq!(router.current().unwrap().id, nav.id);
    }

    #[tokio::test]
    async fn test_not_found_is_rendered_not_raised() {
        let router = router().with_not_found(StaticView::shared("404"));
        let outcome = router.navigate("/nope").await.unwrap();

        assert!(matches!(outcome, NavigationOutcome::NotFound(_)));
        let current = router.current().unwrap();
        assert!(current.is_not_found());
        assert_eq!(current.rendered.leaf_view(), "404");
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let router = router();
        let mut rx = router.subscribe();
        assert!(rx.borrow().is_none());

        router.navigate("/dashboard").await.unwrap();
        assert!(rx.has_changed().unwrap());
        let seen = rx.borrow_and_update().clone().unwrap();
        assert_eq!(seen.route.as_ref().unwrap().title().as_deref(), Some("Dashboard"));
    }

    #[tokio::test]
    async fn test_invalid_and_named_targets() {
        let router = router();
        assert!(matches!(
            router.navigate("mailto:someone@example.com").await,
            Err(NavigationError::External(_))
        ));

        let outcome = router.navigate_named("Dashboard", &PathParams::new()).await.unwrap();
        assert_eq!(outcome.navigation().unwrap().path(), "/dashboard");

        assert!(matches!(
            router.navigate_named("Missing", &PathParams::new()).await,
            Err(NavigationError::Lookup(_))
        ));
    }
}
