//! Startup tests: configuration, development hooks and the initial mount.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use admin_shell::config::{parse_config, Environment};
use admin_shell::lifecycle::BootstrapError;
use admin_shell::navigation::{IconResolver, PageTitle, Sidebar, TabStrip};
use admin_shell::routing::{MetaConsumer, RouteIssue};
use admin_shell::views::{LayoutView, LoadError, StaticView, ViewRegistry};
use admin_shell::Shell;

const SHELL_TOML: &str = include_str!("../shell.toml");

/// Registry for `shell.toml` whose login view refuses to load until
/// `mock_ready` is set.
fn registry(mock_ready: Arc<AtomicBool>) -> ViewRegistry {
    let mut registry = ViewRegistry::new();
    registry
        .register_lazy("login", move || {
            let ready = mock_ready.load(Ordering::SeqCst);
            async move {
                if ready {
                    Ok(StaticView::shared("login"))
                } else {
                    Err(LoadError::new("login", "mock API is not running"))
                }
            }
        })
        .register_eager("layout", Arc::new(LayoutView::new("layout", "Admin")))
        .register_lazy("dashboard", || async { Ok(StaticView::shared("dashboard")) })
        .register_lazy("bum-table", || async { Ok(StaticView::shared("bum-table")) });
    registry
}

#[tokio::test]
async fn test_sample_config_mounts_login() {
    let config = parse_config(SHELL_TOML).unwrap();
    let mock_ready = Arc::new(AtomicBool::new(true));

    let shell = Shell::builder(config, registry(mock_ready)).mount().await.unwrap();
    let current = shell.router().current().unwrap();
    assert_eq!(current.route.as_ref().unwrap().name.as_deref(), Some("Login"));
    assert_eq!(shell.build().public_path, "/");
    assert_eq!(shell.build().proxy.len(), 2);

    let outcome = shell.router().navigate("/dashboard").await.unwrap();
    assert_eq!(outcome.navigation().unwrap().rendered.views(), vec!["layout", "dashboard"]);
}

#[tokio::test]
async fn test_sample_config_meta_is_fully_consumed() {
    let config = parse_config(SHELL_TOML).unwrap();
    let shell = Shell::builder(config, registry(Arc::new(AtomicBool::new(true))))
        .mount()
        .await
        .unwrap();
    let table = shell.router().table();

    let icons = IconResolver::new(&shell.config().icons);
    let title = PageTitle::new(shell.config().app.title.clone());
    let sidebar = Sidebar::new(icons.clone());
    let tabs = TabStrip::new(table);
    let consumers: [&dyn MetaConsumer; 4] = [&title, &sidebar, &tabs, &icons];

    assert!(table.audit_meta(&consumers).is_empty());
    assert_eq!(tabs.tabs().len(), 1);
}

#[tokio::test]
async fn test_dev_hook_runs_before_initial_render() {
    let config = parse_config(SHELL_TOML).unwrap();
    let mock_ready = Arc::new(AtomicBool::new(false));
    let hook_ready = mock_ready.clone();

    let shell = Shell::builder(config, registry(mock_ready))
        .dev_hook("mock-api", move || async move {
            tokio::task::yield_now().await;
            hook_ready.store(true, Ordering::SeqCst);
            Ok(())
        })
        .mount()
        .await
        .unwrap();

    assert!(shell.router().current().is_some());
}

#[tokio::test]
async fn test_dev_hooks_skipped_in_production() {
    let mut config = parse_config(SHELL_TOML).unwrap();
    config.app.environment = Environment::Production;
    let runs = Arc::new(AtomicUsize::new(0));
    let counter = runs.clone();

    let shell = Shell::builder(config, registry(Arc::new(AtomicBool::new(true))))
        .dev_hook("mock-api", move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .mount()
        .await
        .unwrap();

    assert_eq!(runs.load(Ordering::SeqCst), 0);
    assert_eq!(shell.build().public_path, "/production-sub-path/");
    assert!(shell.build().proxy.is_empty());
}

#[tokio::test]
async fn test_failing_dev_hook_aborts_startup() {
    let config = parse_config(SHELL_TOML).unwrap();

    let result = Shell::builder(config, registry(Arc::new(AtomicBool::new(true))))
        .dev_hook("mock-api", || async { Err("port 4000 in use".to_string()) })
        .mount()
        .await;

    assert!(matches!(result, Err(BootstrapError::DevHook { ref name, .. }) if name == "mock-api"));
}

#[tokio::test]
async fn test_initial_load_failure_is_reported() {
    let config = parse_config(SHELL_TOML).unwrap();

    let result = Shell::builder(config, registry(Arc::new(AtomicBool::new(false))))
        .mount()
        .await;

    match result {
        Err(BootstrapError::Mount(err)) => assert_eq!(err.load_error().unwrap().view, "login"),
        other => panic!("expected mount failure, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_unknown_component_is_fatal() {
    let config = parse_config(SHELL_TOML).unwrap();
    let mut registry = ViewRegistry::new();
    registry
        .register_eager("login", StaticView::shared("login"))
        .register_eager("layout", StaticView::shared("layout"))
        .register_eager("dashboard", StaticView::shared("dashboard"));

    let result = Shell::builder(config, registry).mount().await;
    let Err(BootstrapError::Routes(err)) = result else {
        panic!("expected route table error");
    };
    assert!(err.contains(|issue| matches!(
        issue,
        RouteIssue::UnknownComponent { component, .. } if component == "bum-table"
    )));
}
