//! Path matching against the route table.
//!
//! # Responsibilities
//! - Walk the table top-down, siblings in declaration order
//! - Capture path parameters and catch-all remainders
//! - Follow redirects until a rendering route is reached
//!
//! # Design Decisions
//! - First match wins: declaration order is priority order
//! - A sibling whose subtree cannot consume the whole path is skipped
//!   (backtracking), so a leaf at `/` does not hide a layout at `/`
//! - Static segments are case-sensitive and compared after percent-decoding
//! - Redirect targets are rendered with the parameters of the redirecting
//!   match, so `/orgs/:org` redirecting to `members` keeps the org
//! - Never fails: a miss is the explicit `NotFound` outcome

use crate::routing::meta::RouteMeta;
use crate::routing::pattern::{decode_path, encode_path, PathParams, PathPattern};
use crate::routing::resolved::{ResolvedRoute, RouteId};
use crate::routing::table::{RouteRecord, RouteTable};

/// Result of matching a path.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched {
        route: ResolvedRoute,
        /// Originally requested path when at least one redirect was followed.
        redirected_from: Option<String>,
    },
    NotFound,
}

impl MatchOutcome {
    pub fn route(&self) -> Option<&ResolvedRoute> {
        match self {
            MatchOutcome::Matched { route, .. } => Some(route),
            MatchOutcome::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, MatchOutcome::NotFound)
    }
}

/// Stateless matcher borrowing a compiled table.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'t> {
    table: &'t RouteTable,
}

impl<'t> Matcher<'t> {
    pub fn new(table: &'t RouteTable) -> Self {
        Self { table }
    }

    /// Match `path`, following redirects.
    pub fn match_path(&self, path: &str) -> MatchOutcome {
        let mut current = path.to_string();
        let mut redirected_from = None;

        // Cycles are rejected when the table is built, so every redirect
        // chain is shorter than the table.
        for _ in 0..=self.table.len() {
            let Some(route) = self.match_static(&current) else {
                return MatchOutcome::NotFound;
            };

            let redirect = route
                .leaf()
                .and_then(|id| self.table.get(id))
                .and_then(|leaf| leaf.redirect.clone());

            match redirect {
                Some(target) => {
                    let Some(next) = expand_redirect(&target, &route.params) else {
                        tracing::error!(from = %current, to = %target, "Redirect target cannot be rendered");
                        return MatchOutcome::NotFound;
                    };
                    tracing::debug!(from = %current, to = %next, "Following redirect");
                    redirected_from.get_or_insert_with(|| normalize(path));
                    current = next;
                }
                None => {
                    return MatchOutcome::Matched {
                        route,
                        redirected_from,
                    }
                }
            }
        }

        tracing::error!(path, "Redirect chain did not terminate");
        MatchOutcome::NotFound
    }

    /// Match `path` without following redirects.
    pub fn match_static(&self, path: &str) -> Option<ResolvedRoute> {
        let decoded = decode_path(path);
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();
        let mut chain = Vec::new();
        let mut params = PathParams::new();

        if !self.walk(self.table.root_ids(), &segments, &mut chain, &mut params) {
            return None;
        }

        let records: Vec<_> = chain.iter().filter_map(|id| self.table.get(*id)).collect();
        let leaf = records.last()?;
        Some(ResolvedRoute {
            path: encode_path(&segments),
            matched: chain,
            name: leaf.name.clone(),
            meta: RouteMeta::merge_chain(records.iter().map(|r| &r.meta)),
            params,
        })
    }

    fn walk(
        &self,
        siblings: &[RouteId],
        segments: &[&str],
        chain: &mut Vec<RouteId>,
        params: &mut PathParams,
    ) -> bool {
        for id in siblings {
            let Some(record) = self.table.get(*id) else {
                continue;
            };

            let mut captured = PathParams::new();
            let Some(consumed) = record.pattern.match_prefix(segments, &mut captured) else {
                continue;
            };

            chain.push(*id);
            let exact = consumed == segments.len();

            // An exact match on a redirecting route stops here; otherwise an
            // empty-path (default) child may take over.
            let descended = !(exact && record.redirect.is_some())
                && self.walk(&record.children, segments, chain, &mut captured);

            if descended || (exact && can_end_match(record)) {
                params.extend(captured);
                return true;
            }
            chain.pop();
        }
        false
    }
}

/// Grouping routes without a component or redirect only match through
/// their children.
fn can_end_match(record: &RouteRecord) -> bool {
    record.component.is_some() || record.redirect.is_some()
}

fn normalize(path: &str) -> String {
    encode_path(&decode_path(path))
}

/// Substitute captured parameters into a redirect target.
fn expand_redirect(target: &str, params: &PathParams) -> Option<String> {
    PathPattern::parse(target).ok()?.render(params).ok()
}
