//! Navigation targets and browser URL handling.
//!
//! # Design Decisions
//! - Targets are parsed relative to a fixed in-app origin with the `url`
//!   crate, so dot segments are collapsed and unsafe characters escaped
//! - A target resolving to another origin is rejected, never followed
//! - `path` stays percent-encoded as the `url` crate produces it; the
//!   matcher decodes it segment by segment
//! - Hash mode keeps the route in the fragment (`/#/dashboard`), history
//!   mode in the path below the deployment base

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::navigation::error::NavigationError;

const APP_ORIGIN: &str = "http://shell.invalid/";

/// A parsed in-app navigation target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub path: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl Location {
    /// Parse a target such as `/users/7?tab=roles#top`.
    pub fn parse(target: &str) -> Result<Self, NavigationError> {
        let origin = Url::parse(APP_ORIGIN).map_err(|source| NavigationError::InvalidLocation {
            target: target.to_string(),
            source,
        })?;
        let url = origin
            .join(target)
            .map_err(|source| NavigationError::InvalidLocation {
                target: target.to_string(),
                source,
            })?;

        if url.origin() != origin.origin() {
            return Err(NavigationError::External(target.to_string()));
        }

        Ok(Self {
            path: url.path().to_string(),
            query: url.query_pairs().into_owned().collect(),
            hash: url.fragment().filter(|f| !f.is_empty()).map(str::to_string),
        })
    }

    /// Path with query and hash, as it would appear in a link.
    pub fn full_path(&self) -> String {
        let mut full = self.path.clone();
        if !self.query.is_empty() {
            let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            full.push('?');
            full.push_str(&query.join("&"));
        }
        if let Some(hash) = &self.hash {
            full.push('#');
            full.push_str(hash);
        }
        full
    }
}

/// How the shell maps browser URLs to in-app paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// `https://host/base/#/dashboard`
    #[default]
    Hash,
    /// `https://host/base/dashboard`
    History,
}

impl HistoryMode {
    /// Extract the in-app target from a full browser URL.
    ///
    /// Returns `None` when a history-mode URL lies outside `base`.
    pub fn target_from_url(&self, url: &Url, base: &str) -> Option<String> {
        match self {
            HistoryMode::Hash => {
                let fragment = url.fragment().unwrap_or("");
                let target = fragment.trim_start_matches('/');
                Some(format!("/{}", target))
            }
            HistoryMode::History => {
                let base = base.trim_end_matches('/');
                let rest = url.path().strip_prefix(base)?;
                if !rest.is_empty() && !rest.starts_with('/') {
                    return None;
                }
                let mut target = if rest.is_empty() { "/".to_string() } else { rest.to_string() };
                if let Some(query) = url.query() {
                    target.push('?');
                    target.push_str(query);
                }
                Some(target)
            }
        }
    }

    /// Render an in-app path as a link href under `base`.
    pub fn href(&self, base: &str, path: &str) -> String {
        let base = base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        match self {
            HistoryMode::Hash => format!("{}/#/{}", base, path),
            HistoryMode::History => format!("{}/{}", base, path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let location = Location::parse("/users/7?tab=roles#top").unwrap();
        assert_eq!(location.path, "/users/7");
        assert_eq!(location.query.get("tab").map(String::as_str), Some("roles"));
        assert_eq!(location.hash.as_deref(), Some("top"));
        assert_eq!(location.full_path(), "/users/7?tab=roles#top");

        assert_eq!(Location::parse("dashboard").unwrap().path, "/dashboard");
        assert_eq!(Location::parse("/a/../b").unwrap().path, "/b");
    }

    #[test]
    fn test_external_target_rejected() {
        assert!(matches!(
            Location::parse("https://example.com/x"),
            Err(NavigationError::External(_))
        ));
    }

    #[test]
    fn test_hash_mode() {
        let url = Url::parse("https://admin.example.com/#/dashboard?x=1").unwrap();
        assert_eq!(
            HistoryMode::Hash.target_from_url(&url, "/").as_deref(),
            Some("/dashboard?x=1")
        );
        let root = Url::parse("https://admin.example.com/").unwrap();
        assert_eq!(HistoryMode::Hash.target_from_url(&root, "/").as_deref(), Some("/"));
        assert_eq!(HistoryMode::Hash.href("/", "/dashboard"), "/#/dashboard");
    }

    #[test]
    fn test_history_mode_under_base() {
        let url = Url::parse("https://host/production-sub-path/bum-table?page=2").unwrap();
        let mode = HistoryMode::History;
        assert_eq!(
            mode.target_from_url(&url, "/production-sub-path/").as_deref(),
            Some("/bum-table?page=2")
        );
        let outside = Url::parse("https://host/other/bum-table").unwrap();
        assert_eq!(mode.target_from_url(&outside, "/production-sub-path/"), None);
        assert_eq!(mode.href("/production-sub-path/", "dashboard"), "/production-sub-path/dashboard");
    }
}
