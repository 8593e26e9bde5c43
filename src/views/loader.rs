//! Lazy view loading with a per-route cache.
//!
//! # States
//! ```text
//! Idle → Pending: first resolve of a deferred route
//! Pending → Resolved: loader returned a view (cached forever)
//! Pending → Failed: loader returned an error (nothing cached)
//! Failed → Pending: the caller resolves again
//! ```
//!
//! # Design Decisions
//! - Keyed by route identity, not by component id
//! - Single-flight: every resolve that arrives while a load is in progress
//!   awaits that same attempt and sees its result, success or failure
//! - Failures are never retried here; the navigating caller decides
//! - Slots are write-once for the view, so readers never block

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::observability::metrics;
use crate::routing::{RouteId, RouteRecord};
use crate::views::view::{Component, DeferredLoader, LoadError, View};

/// Observable load state of a route's component.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Pending,
    Resolved,
    Failed(Arc<LoadError>),
}

type Attempt = Shared<BoxFuture<'static, Result<Arc<dyn View>, LoadError>>>;

#[derive(Default)]
struct Slot {
    view: OnceCell<Arc<dyn View>>,
    last_error: ArcSwapOption<LoadError>,
}

/// Resolves route components to views, caching deferred loads.
#[derive(Default)]
pub struct ViewLoader {
    slots: DashMap<RouteId, Arc<Slot>>,
    attempts: DashMap<RouteId, Attempt>,
}

impl ViewLoader {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: RouteId) -> Arc<Slot> {
        self.slots.entry(id).or_default().clone()
    }

    /// Resolve the view for `record`.
    ///
    /// Eager components return immediately. Deferred components suspend
    /// until the current load attempt completes; later calls hit the cache.
    /// Routes without a component resolve to `None`.
    pub async fn resolve(&self, record: &RouteRecord) -> Result<Option<Arc<dyn View>>, LoadError> {
        let loader = match &record.component {
            None => return Ok(None),
            Some(Component::Eager(view)) => return Ok(Some(view.clone())),
            Some(Component::Deferred(loader)) => loader,
        };

        let slot = self.slot(record.id);
        if let Some(view) = slot.view.get() {
            metrics::record_view_cache_hit();
            return Ok(Some(view.clone()));
        }

        let attempt = self
            .attempts
            .entry(record.id)
            .or_insert_with(|| start_attempt(record, loader, slot))
            .value()
            .clone();
        let result = attempt.clone().await;

        // A finished attempt makes way for the next explicit resolve.
        self.attempts
            .remove_if(&record.id, |_, current| current.ptr_eq(&attempt));

        result.map(Some)
    }

    /// Synchronous cache peek: eager views, or deferred views already loaded.
    pub fn cached(&self, record: &RouteRecord) -> Option<Arc<dyn View>> {
        match &record.component {
            None => None,
            Some(Component::Eager(view)) => Some(view.clone()),
            Some(Component::Deferred(_)) => self
                .slots
                .get(&record.id)
                .and_then(|slot| slot.view.get().cloned()),
        }
    }

    pub fn state(&self, id: RouteId) -> LoadState {
        let Some(slot) = self.slots.get(&id).map(|s| s.value().clone()) else {
            return LoadState::Idle;
        };
        if slot.view.initialized() {
            LoadState::Resolved
        } else if self.attempts.contains_key(&id) {
            LoadState::Pending
        } else if let Some(err) = slot.last_error.load_full() {
            LoadState::Failed(err)
        } else {
            LoadState::Idle
        }
    }
}

/// Invoke the loader once and wrap the load so every waiter shares it. The
/// outcome is recorded here, once per attempt.
fn start_attempt(record: &RouteRecord, loader: &DeferredLoader, slot: Arc<Slot>) -> Attempt {
    let route = record.display_name();
    tracing::debug!(route = %route, "Loading deferred view");
    let load = loader.load();

    async move {
        match load.await {
            Ok(view) => {
                let _ = slot.view.set(view.clone());
                slot.last_error.store(None);
                metrics::record_view_load("ok");
                tracing::debug!(route = %route, view = view.id(), "Deferred view loaded");
                Ok(view)
            }
            Err(err) => {
                slot.last_error.store(Some(Arc::new(err.clone())));
                metrics::record_view_load("error");
                tracing::warn!(route = %route, error = %err, "Deferred view failed to load");
                Err(err)
            }
        }
    }
    .boxed()
    .shared()
}
