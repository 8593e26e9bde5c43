//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use admin_shell::routing::{RouteDefinition, RouteTable};
use admin_shell::views::{Component, LayoutView, LoadError, StaticView};

/// A deferred component that counts how often its loader runs.
pub fn counting_view(id: &'static str) -> (Component, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let component = Component::deferred(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async move { Ok(StaticView::shared(id)) }
    });
    (component, calls)
}

/// A deferred component whose load completes only once the gate is opened.
pub fn gated_view(id: &'static str) -> (Component, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let waiter = gate.clone();
    let component = Component::deferred(move || {
        let waiter = waiter.clone();
        async move {
            waiter.notified().await;
            Ok(StaticView::shared(id))
        }
    });
    (component, gate)
}

/// A deferred component whose first `failures` loads fail.
pub fn flaky_view(id: &'static str, failures: usize) -> (Component, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let component = Component::deferred(move || {
        let attempt = counter.fetch_add(1, Ordering::SeqCst);
        async move {
            if attempt < failures {
                Err(LoadError::new(id, "chunk request failed"))
            } else {
                Ok(StaticView::shared(id))
            }
        }
    });
    (component, calls)
}

/// The admin route table: login on `/`, a layout with a dashboard child
/// and a stand-alone table page.
pub fn admin_table(dashboard: Component, bum_table: Component) -> RouteTable {
    RouteTable::new(vec![
        RouteDefinition::new("/")
            .name("Login")
            .view(StaticView::shared("login")),
        RouteDefinition::new("/")
            .view(Arc::new(LayoutView::new("layout", "Admin")))
            .redirect("/dashboard")
            .child(
                RouteDefinition::new("dashboard")
                    .name("Dashboard")
                    .component(dashboard)
                    .meta("title", "Dashboard")
                    .meta("icon", "dashboard")
                    .meta("affix", true),
            ),
        RouteDefinition::new("/bum-table")
            .name("BumTable")
            .component(bum_table),
    ])
    .expect("admin table is valid")
}
