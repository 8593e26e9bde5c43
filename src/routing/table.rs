//! Route table compilation and lookup.
//!
//! # Responsibilities
//! - Compile nested route definitions into an immutable arena
//! - Reject invalid tables at startup (all problems reported at once)
//! - Look routes up by name and build paths for programmatic navigation
//!
//! # Design Decisions
//! - Records are stored in pre-order, so `flatten` is the arena itself
//! - Declaration order is preserved exactly: it is match priority
//! - Redirect targets are normalized to absolute paths at compile time
//! - Redirect cycles are found statically, never at navigation time

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::RouteConfig;
use crate::observability::metrics;
use crate::routing::error::{LookupError, RouteIssue, RouteTableError};
use crate::routing::matcher::Matcher;
use crate::routing::meta::{KeySpec, MetaConsumer, RouteMeta};
use crate::routing::pattern::{PathParams, PathPattern};
use crate::routing::resolved::{ResolvedRoute, RouteId};
use crate::views::{Component, View, ViewRegistry};

/// Declarative route definition, as written by the application.
#[derive(Debug, Clone, Default)]
pub struct RouteDefinition {
    pub path: String,
    pub name: Option<String>,
    pub component: Option<Component>,
    pub redirect: Option<String>,
    pub children: Vec<RouteDefinition>,
    pub meta: RouteMeta,
}

impl RouteDefinition {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn component(mut self, component: Component) -> Self {
        self.component = Some(component);
        self
    }

    pub fn view(self, view: Arc<dyn View>) -> Self {
        self.component(Component::Eager(view))
    }

    pub fn redirect(mut self, target: impl Into<String>) -> Self {
        self.redirect = Some(target.into());
        self
    }

    pub fn child(mut self, child: RouteDefinition) -> Self {
        self.children.push(child);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.meta.insert(key, value);
        self
    }
}

/// A compiled route.
#[derive(Debug, Clone)]
pub struct RouteRecord {
    pub id: RouteId,
    pub parent: Option<RouteId>,
    pub children: Vec<RouteId>,
    /// Path as declared.
    pub path: String,
    /// Pattern from the root down to this route.
    pub pattern: PathPattern,
    pub name: Option<String>,
    pub component: Option<Component>,
    /// Absolute redirect target.
    pub redirect: Option<String>,
    pub meta: RouteMeta,
}

impl RouteRecord {
    /// Name if present, otherwise the full pattern. For logs and errors.
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.pattern.to_string())
    }

    /// A route a user can land on directly and stay on.
    pub fn is_routable(&self) -> bool {
        self.component.is_some() && self.redirect.is_none() && self.pattern.is_static()
    }
}

/// Problems found by [`RouteTable::audit_meta`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetaIssue {
    /// No consumer reads this key; usually a typo.
    #[error("route `{route}`: meta key `{key}` is not read by any consumer")]
    UndeclaredKey { route: String, key: String },
    /// A consumer reads this key with a different type.
    #[error("route `{route}`: meta key `{key}` should be a {}", expected.kind)]
    WrongType { route: String, key: String, expected: KeySpec },
}

/// Immutable, validated route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    records: Vec<RouteRecord>,
    roots: Vec<RouteId>,
    names: HashMap<String, RouteId>,
}

impl RouteTable {
    /// Compile and validate route definitions.
    pub fn new(definitions: Vec<RouteDefinition>) -> Result<Self, RouteTableError> {
        Self::compile(definitions, Vec::new())
    }

    /// Build a table from configuration, binding components through `registry`.
    pub fn from_config(routes: &[RouteConfig], registry: &ViewRegistry) -> Result<Self, RouteTableError> {
        let mut issues = Vec::new();
        let definitions = routes
            .iter()
            .map(|route| definition_from_config(route, registry, &mut issues))
            .collect();
        Self::compile(definitions, issues)
    }

    fn compile(definitions: Vec<RouteDefinition>, mut issues: Vec<RouteIssue>) -> Result<Self, RouteTableError> {
        let mut table = Self {
            records: Vec::new(),
            roots: Vec::new(),
            names: HashMap::new(),
        };

        for definition in definitions {
            let id = table.insert(definition, None, &PathPattern::default(), "/", &mut issues);
            table.roots.push(id);
        }

        table.check_structure(&mut issues);
        table.check_redirects(&mut issues);

        if !issues.is_empty() {
            for issue in &issues {
                tracing::error!(issue = %issue, "Route table rejected");
            }
            return Err(RouteTableError::new(issues));
        }

        metrics::record_routes_registered(table.records.len());
        tracing::info!(routes = table.records.len(), "Route table compiled");
        Ok(table)
    }

    fn insert(
        &mut self,
        definition: RouteDefinition,
        parent: Option<RouteId>,
        parent_pattern: &PathPattern,
        parent_path: &str,
        issues: &mut Vec<RouteIssue>,
    ) -> RouteId {
        let id = RouteId(self.records.len());
        let label = definition.name.clone().unwrap_or_else(|| definition.path.clone());

        let absolute = definition.path.starts_with('/') || parent.is_none();
        let pattern = match PathPattern::parse(&definition.path) {
            Ok(own) if absolute => own,
            Ok(own) => parent_pattern.join(&own).unwrap_or_else(|source| {
                issues.push(RouteIssue::InvalidPattern { route: label.clone(), source });
                own
            }),
            Err(source) => {
                issues.push(RouteIssue::InvalidPattern { route: label.clone(), source });
                PathPattern::default()
            }
        };

        if let Some(name) = &definition.name {
            if self.names.insert(name.clone(), id).is_some() {
                issues.push(RouteIssue::DuplicateName(name.clone()));
            }
        }

        let redirect = definition
            .redirect
            .as_deref()
            .map(|target| absolutize(parent_path, target));

        self.records.push(RouteRecord {
            id,
            parent,
            children: Vec::new(),
            path: definition.path,
            pattern: pattern.clone(),
            name: definition.name,
            component: definition.component,
            redirect,
            meta: definition.meta,
        });

        let own_path = pattern.to_string();
        let children: Vec<RouteId> = definition
            .children
            .into_iter()
            .map(|child| self.insert(child, Some(id), &pattern, &own_path, issues))
            .collect();
        self.records[id.0].children = children;
        id
    }

    /// Checks that only need the compiled structure.
    fn check_structure(&self, issues: &mut Vec<RouteIssue>) {
        let mut landing = Vec::new();

        for record in &self.records {
            let has_children = !record.children.is_empty();
            match (&record.component, &record.redirect) {
                (None, Some(_)) if has_children => {
                    issues.push(RouteIssue::RedirectWithChildren(record.display_name()))
                }
                (None, None) if !has_children => {
                    issues.push(RouteIssue::NothingToRender(record.display_name()))
                }
                _ => {}
            }

            if record.parent.is_none() && record.pattern.is_root() && record.redirect.is_some() {
                landing.push(record.display_name());
            }
        }

        if landing.len() > 1 {
            issues.push(RouteIssue::MultipleLandingRedirects(landing));
        }

        let mut sibling_groups = vec![self.roots.as_slice()];
        sibling_groups.extend(self.records.iter().map(|r| r.children.as_slice()));
        for siblings in sibling_groups {
            self.check_shadowing(siblings, issues);
        }
    }

    /// An identical earlier sibling always wins the exact match. A later
    /// sibling is still reachable through its children; without children it
    /// is dead configuration.
    fn check_shadowing(&self, siblings: &[RouteId], issues: &mut Vec<RouteIssue>) {
        for (i, later) in siblings.iter().enumerate() {
            let later = &self.records[later.0];
            let Some(earlier) = siblings[..i]
                .iter()
                .map(|id| &self.records[id.0])
                .find(|earlier| earlier.pattern.same_shape(&later.pattern))
            else {
                continue;
            };

            if later.children.is_empty() {
                issues.push(RouteIssue::Shadowed {
                    route: later.display_name(),
                    shadowed_by: earlier.display_name(),
                });
            } else {
                tracing::warn!(
                    route = %later.display_name(),
                    shadowed_by = %earlier.display_name(),
                    path = %later.pattern,
                    "Duplicate sibling path: exact matches go to the earlier route, later one is reachable only through its children"
                );
            }
        }
    }

    /// Every redirect must land on a route, and following redirects must
    /// terminate.
    fn check_redirects(&self, issues: &mut Vec<RouteIssue>) {
        let matcher = Matcher::new(self);
        let mut next: HashMap<RouteId, RouteId> = HashMap::new();

        for record in &self.records {
            let Some(target) = &record.redirect else {
                continue;
            };
            if let Ok(pattern) = PathPattern::parse(target) {
                let captured: Vec<&str> = record.pattern.param_names().collect();
                for param in pattern.param_names().filter(|p| !captured.contains(p)) {
                    issues.push(RouteIssue::UnboundRedirectParam {
                        route: record.display_name(),
                        target: target.clone(),
                        param: param.to_string(),
                    });
                }
            }
            match matcher.match_static(target).and_then(|r| r.leaf()) {
                Some(leaf) => {
                    next.insert(record.id, leaf);
                }
                None => issues.push(RouteIssue::DanglingRedirect {
                    route: record.display_name(),
                    target: target.clone(),
                }),
            }
        }

        let mut reported: HashSet<RouteId> = HashSet::new();
        for start in self.records.iter().map(|r| r.id) {
            let mut path = vec![start];
            let mut current = start;
            while let Some(&target) = next.get(&current) {
                if let Some(pos) = path.iter().position(|id| *id == target) {
                    let cycle = &path[pos..];
                    if cycle.iter().all(|id| reported.insert(*id)) {
                        let mut names: Vec<String> =
                            cycle.iter().map(|id| self.records[id.0].display_name()).collect();
                        names.push(self.records[target.0].display_name());
                        issues.push(RouteIssue::RedirectCycle(names));
                    }
                    break;
                }
                path.push(target);
                current = target;
            }
        }
    }

    /// All records depth-first, parents before children, in declaration order.
    pub fn flatten(&self) -> Vec<&RouteRecord> {
        self.records.iter().collect()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&RouteRecord> {
        self.names.get(name).map(|id| &self.records[id.0])
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteRecord> {
        self.records.get(id.0)
    }

    pub fn roots(&self) -> impl Iterator<Item = &RouteRecord> {
        self.roots.iter().map(|id| &self.records[id.0])
    }

    pub fn children(&self, id: RouteId) -> impl Iterator<Item = &RouteRecord> {
        self.get(id)
            .map(|r| r.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|child| &self.records[child.0])
    }

    pub(crate) fn root_ids(&self) -> &[RouteId] {
        &self.roots
    }

    /// Records from the root down to `id`.
    pub fn chain(&self, id: RouteId) -> Vec<&RouteRecord> {
        let mut chain = Vec::new();
        let mut current = self.get(id);
        while let Some(record) = current {
            chain.push(record);
            current = record.parent.and_then(|p| self.get(p));
        }
        chain.reverse();
        chain
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a route without a URL, for consumers that list routes
    /// (sidebar, tab strip). Meta is merged exactly as for navigation.
    pub fn resolve_id(&self, id: RouteId) -> Option<ResolvedRoute> {
        let chain = self.chain(id);
        let leaf = chain.last()?;
        let path = if leaf.pattern.is_static() {
            leaf.pattern.render(&PathParams::new()).unwrap_or_else(|_| leaf.pattern.to_string())
        } else {
            leaf.pattern.to_string()
        };
        Some(ResolvedRoute {
            path,
            matched: chain.iter().map(|r| r.id).collect(),
            name: leaf.name.clone(),
            meta: RouteMeta::merge_chain(chain.iter().map(|r| &r.meta)),
            params: PathParams::new(),
        })
    }

    /// Build the path of a named route.
    pub fn href(&self, name: &str, params: &PathParams) -> Result<String, LookupError> {
        let record = self
            .find_by_name(name)
            .ok_or_else(|| LookupError::UnknownName(name.to_string()))?;
        record
            .pattern
            .render(params)
            .map_err(|param| LookupError::MissingParam {
                route: name.to_string(),
                param,
            })
    }

    /// Report meta keys that no consumer declares, and values whose type
    /// disagrees with a declaration.
    pub fn audit_meta(&self, consumers: &[&dyn MetaConsumer]) -> Vec<MetaIssue> {
        let declared: Vec<KeySpec> = consumers.iter().flat_map(|c| c.reads().iter().copied()).collect();
        let mut found = Vec::new();

        for record in &self.records {
            for (key, value) in record.meta.iter() {
                let specs: Vec<&KeySpec> = declared.iter().filter(|s| s.name == key).collect();
                if specs.is_empty() {
                    found.push(MetaIssue::UndeclaredKey {
                        route: record.display_name(),
                        key: key.to_string(),
                    });
                } else if let Some(spec) = specs.iter().find(|s| !s.kind.accepts(value)) {
                    found.push(MetaIssue::WrongType {
                        route: record.display_name(),
                        key: key.to_string(),
                        expected: **spec,
                    });
                }
            }
        }
        found
    }
}

fn absolutize(parent_path: &str, target: &str) -> String {
    if target.starts_with('/') {
        target.to_string()
    } else {
        format!("{}/{}", parent_path.trim_end_matches('/'), target)
    }
}

fn definition_from_config(
    route: &RouteConfig,
    registry: &ViewRegistry,
    issues: &mut Vec<RouteIssue>,
) -> RouteDefinition {
    let component = route.component.as_ref().and_then(|id| {
        let found = registry.get(id).cloned();
        if found.is_none() {
            issues.push(RouteIssue::UnknownComponent {
                route: route.name.clone().unwrap_or_else(|| route.path.clone()),
                component: id.clone(),
            });
        }
        found
    });

    RouteDefinition {
        path: route.path.clone(),
        name: route.name.clone(),
        component,
        redirect: route.redirect.clone(),
        children: route
            .children
            .iter()
            .map(|child| definition_from_config(child, registry, issues))
            .collect(),
        meta: route.meta.clone(),
    }
}
