//! Record Entity
//!
//! A backend-defined JSON object identified by an integer or string `id`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Record identifier as the backend sends it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    /// Read an id out of a JSON value (numbers and non-empty strings only)
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            Value::String(s) if !s.is_empty() => Some(RecordId::Str(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

/// One entity instance in a collection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Build from a JSON value; anything but an object yields `None`
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn id(&self) -> Option<RecordId> {
        self.0.get("id").and_then(RecordId::from_value)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Human-readable value of a field.
    ///
    /// Nested objects (plant protections carry a full `variety`) render as
    /// their `name` member.
    pub fn display(&self, field: &str) -> String {
        self.get(field).map(display_value).unwrap_or_default()
    }

    /// Resolve a Django-style lookup path such as `variety__name`.
    ///
    /// A plain string at the first hop also satisfies `__name`, since most
    /// collections serialize their variety as its name.
    pub fn lookup(&self, path: &str) -> Option<String> {
        let mut parts = path.split("__");
        let first = parts.next()?;
        let mut current = self.get(first)?;
        for part in parts {
            match current {
                Value::Object(map) => current = map.get(part)?,
                Value::String(_) if part == "name" => {}
                _ => return None,
            }
        }
        Some(display_value(current))
    }
}

/// Render a scalar (or nested named object) as text
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => match map.get("name") {
            Some(name) => display_value(name),
            None => Value::Object(map.clone()).to_string(),
        },
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        Record::from_value(value).unwrap()
    }

    #[test]
    fn test_record_id_variants() {
        assert_eq!(record(json!({"id": 7})).id(), Some(RecordId::Int(7)));
        assert_eq!(record(json!({"id": "ab-1"})).id(), Some(RecordId::Str("ab-1".into())));
        assert_eq!(record(json!({"id": null})).id(), None);
        assert_eq!(record(json!({"name": "x"})).id(), None);
    }

    #[test]
    fn test_record_id_serde_untagged() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[3, "x"]"#).unwrap();
        assert_eq!(ids, vec![RecordId::Int(3), RecordId::Str("x".into())]);
        assert_eq!(RecordId::Int(3).to_string(), "3");
    }

    #[test]
    fn test_display_nested_variety() {
        let r = record(json!({
            "id": 1,
            "pests": "Colorado beetle",
            "variety": {"id": 4, "name": "Russet Burbank", "year": 1902}
        }));
        assert_eq!(r.display("variety"), "Russet Burbank");
        assert_eq!(r.display("pests"), "Colorado beetle");
        assert_eq!(r.display("missing"), "");
    }

    #[test]
    fn test_display_numbers() {
        let r = record(json!({"temperature": 18.5, "year": 1902, "note": null}));
        assert_eq!(r.display("temperature"), "18.5");
        assert_eq!(r.display("year"), "1902");
        assert_eq!(r.display("note"), "");
    }

    #[test]
    fn test_lookup_path() {
        let nested = record(json!({"variety": {"name": "Gala"}}));
        let flat = record(json!({"variety": "Gala", "location": "Boise"}));
        assert_eq!(nested.lookup("variety__name").as_deref(), Some("Gala"));
        assert_eq!(flat.lookup("variety__name").as_deref(), Some("Gala"));
        assert_eq!(flat.lookup("location").as_deref(), Some("Boise"));
        assert_eq!(flat.lookup("location__city"), None);
    }
}
