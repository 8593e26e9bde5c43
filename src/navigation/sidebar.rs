//! Sidebar menu built from the route table.
//!
//! Entries come from `RouteTable::resolve_id`, so the sidebar sees the same
//! merged meta a navigation to that route would. A route contributes an
//! entry when it introduces a title of its own; untitled routes (layouts,
//! login) are transparent and lift their children up a level.

use serde::Serialize;

use crate::navigation::icons::{IconRef, IconResolver};
use crate::routing::{KeySpec, MetaConsumer, RouteId, RouteTable, ICON, TITLE};

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    pub title: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconRef>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

/// Sidebar menu.
#[derive(Debug, Clone, Default)]
pub struct Sidebar {
    icons: IconResolver,
}

impl Sidebar {
    pub fn new(icons: IconResolver) -> Self {
        Self { icons }
    }

    pub fn build(&self, table: &RouteTable) -> Vec<SidebarItem> {
        let roots: Vec<RouteId> = table.roots().map(|r| r.id).collect();
        self.collect(table, &roots, None)
    }

    fn collect(&self, table: &RouteTable, ids: &[RouteId], inherited: Option<&str>) -> Vec<SidebarItem> {
        let mut items = Vec::new();

        for id in ids {
            let (Some(record), Some(resolved)) = (table.get(*id), table.resolve_id(*id)) else {
                continue;
            };
            let title = resolved.get(&TITLE);
            let children = self.collect(table, &record.children, title.as_deref());

            let own_title = title.filter(|t| Some(t.as_str()) != inherited);
            match own_title {
                Some(title) if record.is_routable() || !children.is_empty() => items.push(SidebarItem {
                    title,
                    path: resolved.path.clone(),
                    icon: self.icons.for_route(&resolved),
                    children,
                }),
                _ => items.extend(children),
            }
        }
        items
    }
}

impl MetaConsumer for Sidebar {
    fn name(&self) -> &'static str {
        "sidebar"
    }

    fn reads(&self) -> &'static [KeySpec] {
        const READS: &[KeySpec] = &[TITLE.spec(), ICON.spec()];
        READS
    }
}
