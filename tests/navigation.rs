//! End-to-end navigation tests: matching, lazy loading and committing.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use admin_shell::navigation::{
    IconRef, IconResolver, NavigationError, NavigationOutcome, PageTitle, Router, Sidebar, TabStrip,
};
use admin_shell::routing::{PathParams, RouteDefinition, RouteTable};
use admin_shell::views::{LayoutView, LoadState, StaticView};

mod common;

#[tokio::test]
async fn test_stale_navigation_is_superseded() {
    let (slow, gate) = common::gated_view("slow");
    let table = RouteTable::new(vec![
        RouteDefinition::new("/slow").name("Slow").component(slow),
        RouteDefinition::new("/fast").name("Fast").view(StaticView::shared("fast")),
    ])
    .unwrap();
    let router = Router::new(Arc::new(table));
    let mut rx = router.subscribe();

    let (first, second, _) = tokio::join!(router.navigate("/slow"), router.navigate("/fast"), async {
        rx.changed().await.unwrap();
        gate.notify_one();
    });

    let first = first.unwrap();
    let second = second.unwrap();
    assert!(first.is_superseded());
    assert!(matches!(second, NavigationOutcome::Committed(_)));
    assert_eq!(router.current().unwrap().path(), "/fast");

    // The abandoned load still lands in the cache.
    let slow_id = router.table().find_by_name("Slow").unwrap().id;
    assert_eq!(router.loader().state(slow_id), LoadState::Resolved);
}

#[tokio::test]
async fn test_declaration_order_gives_root_to_login() {
    let (dashboard, _) = common::counting_view("dashboard");
    let (bum_table, _) = common::counting_view("bum-table");
    let router = Router::new(Arc::new(common::admin_table(dashboard, bum_table)));

    let outcome = router.navigate("/").await.unwrap();
    let nav = outcome.navigation().unwrap();
    assert_eq!(nav.route.as_ref().unwrap().name.as_deref(), Some("Login"));
    assert_eq!(nav.rendered.views(), vec!["login"]);

    let outcome = router.navigate("/dashboard").await.unwrap();
    let nav = outcome.navigation().unwrap();
    assert_eq!(nav.rendered.views(), vec!["layout", "dashboard"]);
    assert!(nav.redirected_from.is_none());
}

#[tokio::test]
async fn test_layout_redirect_resolves_like_its_target() {
    let table = RouteTable::new(vec![RouteDefinition::new("/")
        .view(Arc::new(LayoutView::new("layout", "Admin")))
        .redirect("/dashboard")
        .child(
            RouteDefinition::new("dashboard")
                .name("Dashboard")
                .view(StaticView::shared("dashboard"))
                .meta("title", "Dashboard"),
        )])
    .unwrap();
    let router = Router::new(Arc::new(table));

    let via_root = router.navigate("/").await.unwrap();
    let via_root = via_root.navigation().unwrap().clone();
    let direct = router.navigate("/dashboard").await.unwrap();
    let direct = direct.navigation().unwrap().clone();

    assert_eq!(via_root.route, direct.route);
    assert_eq!(via_root.rendered, direct.rendered);
    assert_eq!(via_root.redirected_from.as_deref(), Some("/"));
    assert_eq!(via_root.rendered.props.get("heading").map(String::as_str), Some("Dashboard"));
}

#[tokio::test]
async fn test_unmatched_path_renders_not_found() {
    let (dashboard, _) = common::counting_view("dashboard");
    let (bum_table, _) = common::counting_view("bum-table");
    let router = Router::new(Arc::new(common::admin_table(dashboard, bum_table)))
        .with_not_found(StaticView::shared("404"));

    let outcome = router.navigate("/no/such/page?x=1").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::NotFound(_)));

    let current = router.current().unwrap();
    assert!(current.is_not_found());
    assert_eq!(current.rendered.leaf_view(), "404");
    assert_eq!(current.location.query.get("x").map(String::as_str), Some("1"));
}

#[tokio::test]
async fn test_views_load_once_across_navigations() {
    let (dashboard, dashboard_calls) = common::counting_view("dashboard");
    let (bum_table, table_calls) = common::counting_view("bum-table");
    let router = Router::new(Arc::new(common::admin_table(dashboard, bum_table)));

    for target in ["/dashboard", "/bum-table", "/dashboard", "/bum-table", "/dashboard"] {
        router.navigate(target).await.unwrap();
    }

    assert_eq!(dashboard_calls.load(Ordering::SeqCst), 1);
    assert_eq!(table_calls.load(Ordering::SeqCst), 1);

    let record = router.table().find_by_name("Dashboard").unwrap();
    let first = router.loader().cached(record).unwrap();
    router.navigate("/dashboard").await.unwrap();
    let second = router.loader().cached(record).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_load_failure_keeps_previous_view() {
    let (dashboard, _) = common::counting_view("dashboard");
    let (bum_table, calls) = common::flaky_view("bum-table", 1);
    let router = Router::new(Arc::new(common::admin_table(dashboard, bum_table)));

    router.navigate("/dashboard").await.unwrap();
    let before = router.current().unwrap();

    let err = router.navigate("/bum-table").await.unwrap_err();
    assert!(matches!(err, NavigationError::Load { ref route, .. } if route == "BumTable"));
    assert_eq!(err.load_error().unwrap().view, "bum-table");
    assert_eq!(router.current().unwrap().id, before.id);

    let id = router.table().find_by_name("BumTable").unwrap().id;
    assert!(matches!(router.loader().state(id), LoadState::Failed(_)));

    // Failures are not cached: the next navigation loads again.
    let outcome = router.navigate("/bum-table").await.unwrap();
    assert!(matches!(outcome, NavigationOutcome::Committed(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(router.loader().state(id), LoadState::Resolved);
}

#[tokio::test]
async fn test_tab_strip_follows_navigation() {
    let table = RouteTable::new(vec![RouteDefinition::new("/")
        .view(Arc::new(LayoutView::new("layout", "Admin")))
        .redirect("/dashboard")
        .child(
            RouteDefinition::new("dashboard")
                .name("Dashboard")
                .view(StaticView::shared("dashboard"))
                .meta("title", "Dashboard")
                .meta("affix", true),
        )
        .child(
            RouteDefinition::new("users/:id")
                .name("User")
                .view(StaticView::shared("user"))
                .meta("title", "User"),
        )])
    .unwrap();
    let router = Router::new(Arc::new(table));
    let mut tabs = TabStrip::new(router.table());
    assert_eq!(tabs.tabs().len(), 1);
    assert!(tabs.tabs()[0].affix);

    for target in ["/users/7", "/users/9", "/users/7"] {
        let outcome = router.navigate(target).await.unwrap();
        tabs.visit(outcome.navigation().unwrap());
    }
    let paths: Vec<_> = tabs.tabs().iter().map(|t| t.path.as_str()).collect();
    assert_eq!(paths, vec!["/dashboard", "/users/7", "/users/9"]);
    assert_eq!(tabs.active(), Some("/users/7"));

    assert!(!tabs.close("/dashboard"));
    assert!(tabs.close("/users/7"));
    assert_eq!(tabs.active(), Some("/dashboard"));
    assert_eq!(tabs.tabs().len(), 2);
}

#[tokio::test]
async fn test_title_and_sidebar_read_route_meta() {
    let (dashboard, _) = common::counting_view("dashboard");
    let (bum_table, _) = common::counting_view("bum-table");
    let router = Router::new(Arc::new(common::admin_table(dashboard, bum_table)));
    let title = PageTitle::new("Admin");

    let outcome = router.navigate("/dashboard").await.unwrap();
    assert_eq!(title.for_navigation(outcome.navigation().unwrap()), "Dashboard - Admin");
    let outcome = router.navigate("/bum-table").await.unwrap();
    assert_eq!(title.for_navigation(outcome.navigation().unwrap()), "Admin");

    let items = Sidebar::new(IconResolver::default()).build(router.table());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Dashboard");
    assert_eq!(items[0].path, "/dashboard");
    assert_eq!(items[0].icon, Some(IconRef::Sprite("#icon-dashboard".into())));
}

#[tokio::test]
async fn test_non_ascii_and_spaced_routes_are_reachable() {
    let table = RouteTable::new(vec![
        RouteDefinition::new("/报表").name("Report").view(StaticView::shared("report")),
        RouteDefinition::new("/bum table").name("BumTable").view(StaticView::shared("bum-table")),
        RouteDefinition::new("/").redirect("/报表"),
    ])
    .unwrap();
    let router = Router::new(Arc::new(table));

    let direct = router.navigate("/报表").await.unwrap();
    let direct = direct.navigation().unwrap().clone();
    assert_eq!(direct.rendered.leaf_view(), "report");
    assert_eq!(direct.path(), "/%E6%8A%A5%E8%A1%A8");

    let redirected = router.navigate("/").await.unwrap();
    assert_eq!(redirected.navigation().unwrap().route, direct.route);

    let spaced = router.navigate("/bum table").await.unwrap();
    assert_eq!(spaced.navigation().unwrap().rendered.leaf_view(), "bum-table");
    let encoded = router.navigate("/bum%20table").await.unwrap();
    assert!(matches!(encoded, NavigationOutcome::Committed(_)));
}

#[tokio::test]
async fn test_named_navigation_round_trips_param_values() {
    let table = RouteTable::new(vec![
        RouteDefinition::new("/users/:id").name("User").view(StaticView::shared("user")),
        RouteDefinition::new("/users/:id/files").name("UserFiles").view(StaticView::shared("files")),
    ])
    .unwrap();
    let router = Router::new(Arc::new(table));

    for value in ["a/b", "what?x=1", "top#anchor", "张三 li"] {
        let mut params = PathParams::new();
        params.insert("id".into(), value.into());

        let outcome = router.navigate_named("User", &params).await.unwrap();
        let nav = outcome.navigation().unwrap();
        let route = nav.route.as_ref().unwrap();
        assert_eq!(route.name.as_deref(), Some("User"), "value {value}");
        assert_eq!(route.param("id"), Some(value));
        assert!(nav.location.query.is_empty() && nav.location.hash.is_none());
    }
}
