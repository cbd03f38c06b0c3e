//! Per-call navigation parameters
//!
//! A `StateObject` carries whatever a single `navigate` call needs to hand to
//! the target screen. It has no fixed schema, but values are restricted to a
//! small closed set of primitive kinds so screens can compare them cheaply.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SOURCE: &str = "source";
pub const NAME: &str = "name";
pub const URL: &str = "url";
pub const INDEX: &str = "index";
pub const GENRE: &str = "genre";
pub const FILE_NAME: &str = "file_name";
pub const VOLUME: &str = "volume";
pub const LANGUAGE: &str = "language";
pub const MODE: &str = "mode";

/// A single field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bool(b) => write!(f, "{}", b),
            StateValue::Int(i) => write!(f, "{}", i),
            StateValue::Float(v) => write!(f, "{}", v),
            StateValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Str(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Str(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<usize> for StateValue {
    fn from(value: usize) -> Self {
        StateValue::Int(value as i64)
    }
}

impl From<u8> for StateValue {
    fn from(value: u8) -> Self {
        StateValue::Int(value as i64)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Float(value)
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

/// Ephemeral record of named fields passed into one navigation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateObject {
    fields: BTreeMap<String, StateValue>,
}

impl StateObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<StateValue>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        self.fields.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(StateValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer field; numeric strings are accepted since catalogs often carry
    /// indices as text
    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.fields.get(key) {
            Some(StateValue::Int(i)) => Some(*i),
            Some(StateValue::Str(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.fields.get(key) {
            Some(StateValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn get_index(&self) -> Option<usize> {
        self.get_int(INDEX).and_then(|i| usize::try_from(i).ok())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Copy of only the listed fields
    pub fn project(&self, fields: &[&str]) -> StateObject {
        let mut out = StateObject::new();
        for key in fields {
            if let Some(value) = self.fields.get(*key) {
                out.fields.insert((*key).to_string(), value.clone());
            }
        }
        out
    }

    /// True when both records agree on every listed field (absent on both
    /// sides counts as agreement)
    pub fn same_fields(&self, other: &StateObject, fields: &[&str]) -> bool {
        fields.iter().all(|key| self.fields.get(*key) == other.fields.get(*key))
    }

    /// Whether handing `incoming` to a screen that last displayed `previous`
    /// would change anything the screen reads
    pub fn is_noop(previous: Option<&StateObject>, incoming: Option<&StateObject>, fields: &[&str]) -> bool {
        match (previous, incoming) {
            (_, None) => true,
            (None, Some(_)) => false,
            (Some(prev), Some(next)) => prev.same_fields(next, fields),
        }
    }
}

impl fmt::Display for StateObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let state = StateObject::new()
            .with(NAME, "Jazz FM")
            .with(INDEX, 12usize)
            .with("live", true)
            .with("page", "3");

        assert_eq!(state.get_str(NAME), Some("Jazz FM"));
        assert_eq!(state.get_index(), Some(12));
        assert_eq!(state.get_bool("live"), Some(true));
        assert_eq!(state.get_int("page"), Some(3));
        assert_eq!(state.get_str(INDEX), None);
    }

    #[test]
    fn test_noop_detection_uses_declared_fields_only() {
        let shown = StateObject::new().with(URL, "http://a").with("ts", 1i64);
        let same_url = StateObject::new().with(URL, "http://a").with("ts", 2i64);
        let other_url = StateObject::new().with(URL, "http://b");

        assert!(StateObject::is_noop(Some(&shown), Some(&same_url), &[URL]));
        assert!(!StateObject::is_noop(Some(&shown), Some(&other_url), &[URL]));
        assert!(!StateObject::is_noop(None, Some(&same_url), &[URL]));
        assert!(StateObject::is_noop(Some(&shown), None, &[URL]));
    }

    #[test]
    fn test_project_keeps_listed_fields() {
        let state = StateObject::new().with(NAME, "a").with(GENRE, "rock").with(URL, "u");
        let projected = state.project(&[NAME, URL, FILE_NAME]);
        assert_eq!(projected.len(), 2);
        assert!(!projected.contains(GENRE));
    }

    #[test]
    fn test_display_is_sorted() {
        let state = StateObject::new().with("b", 2i64).with("a", "x");
        assert_eq!(state.to_string(), "{a=x, b=2}");
    }
}
