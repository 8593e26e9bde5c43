//! Route table construction and lookup errors.

use std::fmt;
use thiserror::Error;

use crate::routing::pattern::PatternError;

/// A single configuration problem found while compiling the route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteIssue {
    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),

    #[error("route `{route}` has an invalid path: {source}")]
    InvalidPattern {
        route: String,
        #[source]
        source: PatternError,
    },

    #[error("route `{route}` redirects to `{target}`, which matches no route")]
    DanglingRedirect { route: String, target: String },

    #[error("redirect cycle: {}", .0.join(" -> "))]
    RedirectCycle(Vec<String>),

    #[error("route `{route}` redirects to `{target}`, whose parameter `{param}` it does not capture")]
    UnboundRedirectParam { route: String, target: String, param: String },

    #[error("route `{0}` redirects without a component but declares children")]
    RedirectWithChildren(String),

    #[error("route `{0}` has no component, redirect or children")]
    NothingToRender(String),

    #[error("more than one landing redirect for `/`: {}", .0.join(", "))]
    MultipleLandingRedirects(Vec<String>),

    #[error("route `{route}` references unknown component `{component}`")]
    UnknownComponent { route: String, component: String },

    #[error("route `{route}` is unreachable: shadowed by earlier sibling `{shadowed_by}`")]
    Shadowed { route: String, shadowed_by: String },
}

/// Fatal configuration error: the route table could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct RouteTableError {
    pub issues: Vec<RouteIssue>,
}

impl RouteTableError {
    pub fn new(issues: Vec<RouteIssue>) -> Self {
        Self { issues }
    }

    pub fn contains(&self, predicate: impl Fn(&RouteIssue) -> bool) -> bool {
        self.issues.iter().any(predicate)
    }
}

impl fmt::Display for RouteTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid route table: ")?;
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

/// Errors from name-based lookups (programmatic navigation).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no route named `{0}`")]
    UnknownName(String),

    #[error("route `{route}` needs parameter `{param}`")]
    MissingParam { route: String, param: String },
}
