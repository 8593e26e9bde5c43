//! Startup orchestration.
//!
//! # Responsibilities
//! - Validate configuration and compile the route table
//! - Run development hooks (mock API servers) before anything renders
//! - Construct the router and mount the initial location
//!
//! # Design Decisions
//! - Fail fast: configuration and route table errors are fatal
//! - Development hooks run sequentially, in registration order, and only
//!   in the development environment
//! - Mounting is the first navigation; a not-found initial path is not fatal

use futures_util::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{validate_config, ConfigError, ResolvedBuild, ShellConfig};
use crate::navigation::{NavigationError, NavigationOutcome, Router};
use crate::routing::{RouteTable, RouteTableError};
use crate::views::{View, ViewRegistry};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Routes(#[from] RouteTableError),

    #[error("development hook `{name}` failed: {reason}")]
    DevHook { name: String, reason: String },

    #[error("initial navigation failed: {0}")]
    Mount(#[from] NavigationError),
}

type HookFuture = BoxFuture<'static, Result<(), String>>;

struct DevHook {
    name: String,
    run: Box<dyn FnOnce() -> HookFuture + Send>,
}

/// Collects everything needed to start the shell.
pub struct ShellBuilder {
    config: ShellConfig,
    registry: ViewRegistry,
    dev_hooks: Vec<DevHook>,
    not_found: Option<Arc<dyn View>>,
}

impl ShellBuilder {
    pub fn new(config: ShellConfig, registry: ViewRegistry) -> Self {
        Self {
            config,
            registry,
            dev_hooks: Vec::new(),
            not_found: None,
        }
    }

    /// Register a hook that must complete before the first render in
    /// development, such as starting a mock API server.
    pub fn dev_hook<F, Fut>(mut self, name: impl Into<String>, hook: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), String>> + Send + 'static,
    {
        self.dev_hooks.push(DevHook {
            name: name.into(),
            run: Box::new(move || hook().boxed()),
        });
        self
    }

    pub fn not_found(mut self, view: Arc<dyn View>) -> Self {
        self.not_found = Some(view);
        self
    }

    /// Start the shell and navigate to the configured initial path.
    pub async fn mount(self) -> Result<Shell, BootstrapError> {
        let environment = self.config.app.environment;
        tracing::info!(environment = ?environment, "admin-shell starting");

        validate_config(&self.config).map_err(ConfigError::Validation)?;
        let table = RouteTable::from_config(&self.config.routes, &self.registry)?;

        if environment.is_production() {
            if !self.dev_hooks.is_empty() {
                tracing::debug!(hooks = self.dev_hooks.len(), "Skipping development hooks");
            }
        } else {
            for hook in self.dev_hooks {
                tracing::info!(hook = %hook.name, "Running development hook");
                (hook.run)().await.map_err(|reason| BootstrapError::DevHook {
                    name: hook.name.clone(),
                    reason,
                })?;
            }
        }

        let mut router = Router::new(Arc::new(table));
        if let Some(view) = self.not_found {
            router = router.with_not_found(view);
        }

        let outcome = router.navigate(&self.config.app.initial_path).await?;
        if let NavigationOutcome::NotFound(_) = outcome {
            tracing::warn!(path = %self.config.app.initial_path, "Initial path matches no route");
        }

        let build = self.config.build.resolve(environment);
        tracing::info!(public_path = %build.public_path, "Shell mounted");

        Ok(Shell {
            config: self.config,
            router,
            build,
        })
    }
}

/// A running shell: configuration plus the router that owns navigation.
pub struct Shell {
    config: ShellConfig,
    router: Router,
    build: ResolvedBuild,
}

impl Shell {
    pub fn builder(config: ShellConfig, registry: ViewRegistry) -> ShellBuilder {
        ShellBuilder::new(config, registry)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn build(&self) -> &ResolvedBuild {
        &self.build
    }
}
