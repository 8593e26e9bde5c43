//! Tab strip of visited views.
//!
//! Routes with `affix = true` are pinned from startup and cannot be
//! closed; every other titled route gets a tab when visited.

use serde::Serialize;

use crate::navigation::router::Navigation;
use crate::routing::{KeySpec, MetaConsumer, ResolvedRoute, RouteTable, AFFIX, TITLE};

/// One tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub path: String,
    pub title: String,
    pub affix: bool,
}

/// Visited-views tab strip.
#[derive(Debug, Clone, Default)]
pub struct TabStrip {
    tabs: Vec<Tab>,
    active: Option<String>,
}

impl TabStrip {
    /// Start with every affixed, directly routable route pinned.
    pub fn new(table: &RouteTable) -> Self {
        let tabs = table
            .flatten()
            .into_iter()
            .filter(|record| record.is_routable())
            .filter_map(|record| table.resolve_id(record.id))
            .filter(|route| route.get(&AFFIX).unwrap_or(false))
            .filter_map(|route| tab_for(&route))
            .collect();
        Self { tabs, active: None }
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Record a committed navigation.
    pub fn visit(&mut self, navigation: &Navigation) {
        let Some(route) = navigation.route.as_ref() else {
            return;
        };
        let Some(tab) = tab_for(route) else {
            return;
        };
        self.active = Some(tab.path.clone());
        if !self.tabs.iter().any(|t| t.path == tab.path) {
            self.tabs.push(tab);
        }
    }

    /// Close a tab. Affixed tabs stay; returns whether a tab was removed.
    pub fn close(&mut self, path: &str) -> bool {
        let Some(index) = self.tabs.iter().position(|t| t.path == path && !t.affix) else {
            return false;
        };
        self.tabs.remove(index);
        if self.active.as_deref() == Some(path) {
            let fallback = index.checked_sub(1).or(if self.tabs.is_empty() { None } else { Some(0) });
            self.active = fallback.and_then(|i| self.tabs.get(i)).map(|t| t.path.clone());
        }
        true
    }
}

fn tab_for(route: &ResolvedRoute) -> Option<Tab> {
    Some(Tab {
        path: route.path.clone(),
        title: route.get(&TITLE)?,
        affix: route.get(&AFFIX).unwrap_or(false),
    })
}

impl MetaConsumer for TabStrip {
    fn name(&self) -> &'static str {
        "tabs"
    }

    fn reads(&self) -> &'static [KeySpec] {
        const READS: &[KeySpec] = &[TITLE.spec(), AFFIX.spec()];
        READS
    }
}
