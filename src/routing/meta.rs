//! Route metadata bag and typed key access.
//!
//! # Responsibilities
//! - Hold per-route navigation hints as an open key/value map
//! - Merge a matched chain root→leaf (innermost wins)
//! - Give consumers typed access through declared keys
//!
//! # Design Decisions
//! - Values are `serde_json::Value` so TOML and builder input share one shape
//! - A missing key means "no hint", never an error
//! - A present key of the wrong type reads as `None` and is logged

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Open metadata mapping attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteMeta(BTreeMap<String, Value>);

impl RouteMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a declared key with its expected type.
    pub fn get<T: MetaValue>(&self, key: &MetaKey<T>) -> Option<T> {
        let raw = self.0.get(key.name)?;
        let value = T::from_value(raw);
        if value.is_none() {
            tracing::warn!(
                key = key.name,
                expected = %key.kind,
                found = %raw,
                "Route meta value has unexpected type"
            );
        }
        value
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply `inner` over this map; keys in `inner` win on collision.
    pub fn apply(&mut self, inner: &RouteMeta) {
        for (key, value) in &inner.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Merge a chain of meta maps ordered root→leaf.
    pub fn merge_chain<'a>(levels: impl IntoIterator<Item = &'a RouteMeta>) -> RouteMeta {
        levels.into_iter().fold(RouteMeta::new(), |mut acc, level| {
            acc.apply(level);
            acc
        })
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for RouteMeta {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Expected JSON type of a declared meta key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKind {
    String,
    Bool,
    Number,
}

impl MetaKind {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            MetaKind::String => value.is_string(),
            MetaKind::Bool => value.is_boolean(),
            MetaKind::Number => value.is_number(),
        }
    }
}

impl fmt::Display for MetaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetaKind::String => "string",
            MetaKind::Bool => "bool",
            MetaKind::Number => "number",
        };
        f.write_str(name)
    }
}

/// Types that can be read out of a meta value.
pub trait MetaValue: Sized {
    const KIND: MetaKind;
    fn from_value(value: &Value) -> Option<Self>;
}

impl MetaValue for String {
    const KIND: MetaKind = MetaKind::String;
    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl MetaValue for bool {
    const KIND: MetaKind = MetaKind::Bool;
    fn from_value(value: &Value) -> Option<Self> {
        value.as_bool()
    }
}

impl MetaValue for f64 {
    const KIND: MetaKind = MetaKind::Number;
    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }
}

/// Untyped description of a declared key, used for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySpec {
    pub name: &'static str,
    pub kind: MetaKind,
}

/// A typed meta key declared by a consumer.
pub struct MetaKey<T> {
    name: &'static str,
    kind: MetaKind,
    _marker: PhantomData<fn() -> T>,
}

impl<T: MetaValue> MetaKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            kind: T::KIND,
            _marker: PhantomData,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn spec(&self) -> KeySpec {
        KeySpec {
            name: self.name,
            kind: self.kind,
        }
    }
}

/// Display string for page titles, tabs and sidebar entries.
pub const TITLE: MetaKey<String> = MetaKey::new("title");

/// Identifier into the icon catalog, or an external URL.
pub const ICON: MetaKey<String> = MetaKey::new("icon");

/// Keeps the route pinned in the tab strip.
pub const AFFIX: MetaKey<bool> = MetaKey::new("affix");

/// Anything that reads resolved route metadata.
///
/// Each consumer lists the keys it reads so that unknown keys in the
/// route table can be reported instead of silently ignored.
pub trait MetaConsumer {
    fn name(&self) -> &'static str;
    fn reads(&self) -> &'static [KeySpec];
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_chain_leaf_wins() {
        let parent: RouteMeta = [("icon", json!("home"))].into_iter().collect();
        let child: RouteMeta = [("title", json!("Dashboard"))].into_iter().collect();

        let merged = RouteMeta::merge_chain([&parent, &child]);
        assert_eq!(merged.get(&ICON).as_deref(), Some("home"));
        assert_eq!(merged.get(&TITLE).as_deref(), Some("Dashboard"));

        let override_icon: RouteMeta = [("icon", json!("chart"))].into_iter().collect();
        let merged = RouteMeta::merge_chain([&parent, &child, &override_icon]);
        assert_eq!(merged.get(&ICON).as_deref(), Some("chart"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_missing_and_mistyped_keys() {
        let meta: RouteMeta = [("affix", json!("yes"))].into_iter().collect();
        assert_eq!(meta.get(&TITLE), None);
        assert_eq!(meta.get(&AFFIX), None);
        assert!(meta.contains("affix"));
    }

    #[test]
    fn test_key_specs() {
        assert_eq!(AFFIX.spec().kind, MetaKind::Bool);
        assert_eq!(TITLE.name(), "title");
        assert!(MetaKind::Number.accepts(&json!(3)));
        assert!(!MetaKind::String.accepts(&json!(true)));
    }

    #[test]
    fn test_meta_deserializes_from_toml() {
        let meta: RouteMeta = toml::from_str("title = \"Dashboard\"\naffix = true").unwrap();
        assert_eq!(meta.get(&AFFIX), Some(true));
        assert_eq!(meta.get(&TITLE).as_deref(), Some("Dashboard"));
    }
}
