//! Filter Set
//!
//! Active query constraints keyed by filter key. Blank values mean
//! "unfiltered" and never reach the wire.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterSet(BTreeMap<String, String>);

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a filter; returns `true` when the stored value changed
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        let key = key.into();
        let value = value.into();
        if self.0.get(&key) == Some(&value) {
            return false;
        }
        self.0.insert(key, value);
        true
    }

    /// Raw value, including blanks
    pub fn get(&self, key: &str) -> &str {
        self.0.get(key).map(String::as_str).unwrap_or("")
    }

    /// Filters that actually constrain the result, trimmed
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    pub fn is_unfiltered(&self) -> bool {
        self.active().next().is_none()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_are_inactive() {
        let mut filters = FilterSet::new();
        filters.set("location", "  ");
        filters.set("variety", "Gala");
        let active: Vec<_> = filters.active().collect();
        assert_eq!(active, vec![("variety", "Gala")]);
        assert!(!filters.is_unfiltered());
    }

    #[test]
    fn test_set_reports_change() {
        let mut filters = FilterSet::new();
        assert!(filters.set("pests", "aphid"));
        assert!(!filters.set("pests", "aphid"));
        assert!(filters.set("pests", ""));
        assert!(filters.is_unfiltered());
        assert_eq!(filters.get("pests"), "");
    }
}
