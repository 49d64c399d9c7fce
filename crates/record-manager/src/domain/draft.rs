//! Draft
//!
//! The editable, not-yet-submitted form state for a record. Every value is
//! held as the string the input produced; conversion to the typed JSON
//! payload happens once, on submit.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use super::record::Record;
use crate::error::{Error, Result};
use crate::schema::{CollectionSchema, FieldKind};

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Value format of `<input type="datetime-local">`
const INPUT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const WIRE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const ACCEPTED_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Draft(BTreeMap<String, String>);

impl Draft {
    /// One empty value per schema field
    pub fn empty(schema: &CollectionSchema) -> Self {
        Self(schema.fields.iter().map(|f| (f.name.to_string(), String::new())).collect())
    }

    /// Copy a record's display values into a draft
    pub fn from_record(schema: &CollectionSchema, record: &Record) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| {
                let raw = record.display(f.name);
                let value = match f.kind {
                    FieldKind::DateTime => to_input_datetime(&raw),
                    _ => raw,
                };
                (f.name.to_string(), value)
            })
            .collect();
        Self(values)
    }

    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    /// Builder-style `set`, handy when assembling drafts in code
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.0.values().all(|v| v.trim().is_empty())
    }

    /// Validate against the schema and build the JSON request body.
    ///
    /// Required fields must be non-blank. Blank optional fields are sent as
    /// `null`. References are sent as their display value.
    pub fn to_payload(&self, schema: &CollectionSchema) -> Result<Value> {
        let mut body = Map::new();
        for field in schema.fields {
            let raw = self.get(field.name).trim();
            if raw.is_empty() {
                if field.required {
                    return Err(Error::MissingField(field.name.to_string()));
                }
                body.insert(field.name.to_string(), Value::Null);
                continue;
            }
            let value = convert(field.name, field.kind, raw)?;
            body.insert(field.name.to_string(), value);
        }
        Ok(Value::Object(body))
    }
}

fn convert(name: &str, kind: FieldKind, raw: &str) -> Result<Value> {
    let invalid = |reason: &str| Error::InvalidField { field: name.to_string(), reason: reason.to_string() };
    match kind {
        FieldKind::Text | FieldKind::LongText | FieldKind::Reference { .. } => Ok(Value::String(raw.to_string())),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| invalid("expected a whole number")),
        FieldKind::Float => raw
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| invalid("expected a number")),
        FieldKind::Date => NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(|d| Value::String(d.format(DATE_FORMAT).to_string()))
            .map_err(|_| invalid("expected YYYY-MM-DD")),
        FieldKind::DateTime => parse_datetime(raw)
            .map(|dt| Value::String(dt.format(WIRE_DATETIME_FORMAT).to_string()))
            .ok_or_else(|| invalid("expected a date and time")),
        FieldKind::Url => {
            if raw.starts_with("http://") || raw.starts_with("https://") {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(invalid("expected an http(s) URL"))
            }
        }
    }
}

/// Accepts the input formats plus a bare date (midnight)
fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    ACCEPTED_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Backend datetimes (`2024-05-01 12:30:00`) in the form a datetime input shows
fn to_input_datetime(raw: &str) -> String {
    parse_datetime(raw)
        .map(|dt| dt.format(INPUT_DATETIME_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{PLANT_PROTECTIONS, POTATO_VARIETIES, WEATHER_DATA};
    use serde_json::json;

    #[test]
    fn test_empty_draft_has_every_field() {
        let draft = Draft::empty(&WEATHER_DATA);
        assert!(draft.is_blank());
        for field in WEATHER_DATA.fields {
            assert_eq!(draft.get(field.name), "");
        }
    }

    #[test]
    fn test_payload_converts_kinds() {
        let draft = Draft::empty(&WEATHER_DATA)
            .with("location", "Field A")
            .with("date", "2024-05-01")
            .with("temperature", "18")
            .with("humidity", "40.5")
            .with("precipitation", "0");
        let payload = draft.to_payload(&WEATHER_DATA).unwrap();
        assert_eq!(payload["location"], json!("Field A"));
        assert_eq!(payload["date"], json!("2024-05-01T00:00:00"));
        assert_eq!(payload["temperature"], json!(18.0));
        assert_eq!(payload["humidity"], json!(40.5));
    }

    #[test]
    fn test_missing_required_field() {
        let draft = Draft::empty(&WEATHER_DATA).with("location", "Field A");
        let err = draft.to_payload(&WEATHER_DATA).unwrap_err();
        assert_eq!(err, Error::MissingField("date".to_string()));
    }

    #[test]
    fn test_invalid_number_and_date() {
        let draft = Draft::empty(&POTATO_VARIETIES)
            .with("name", "Gala")
            .with("year", "nineteen")
            .with("link", "https://example.org/gala");
        assert!(matches!(
            draft.to_payload(&POTATO_VARIETIES),
            Err(Error::InvalidField { ref field, .. }) if field == "year"
        ));

        let draft = Draft::empty(&PLANT_PROTECTIONS)
            .with("pests", "aphid")
            .with("biological_measures", "ladybirds")
            .with("application_date", "05/01/2024")
            .with("results", "ok")
            .with("variety", "Gala");
        assert!(draft.to_payload(&PLANT_PROTECTIONS).unwrap_err().is_validation());
    }

    #[test]
    fn test_optional_blank_is_null() {
        let draft = Draft::empty(&POTATO_VARIETIES)
            .with("name", "Gala")
            .with("year", "2001")
            .with("link", "https://example.org/gala");
        let payload = draft.to_payload(&POTATO_VARIETIES).unwrap();
        assert_eq!(payload["patent_number"], Value::Null);
        assert_eq!(payload["year"], json!(2001));
    }

    #[test]
    fn test_reference_keeps_display_name() {
        let record = Record::from_value(json!({
            "id": 9,
            "pests": "aphid",
            "biological_measures": "ladybirds",
            "application_date": "2024-06-01",
            "results": "fewer aphids",
            "variety": {"id": 2, "name": "Russet Burbank"}
        }))
        .unwrap();
        let draft = Draft::from_record(&PLANT_PROTECTIONS, &record);
        assert_eq!(draft.get("variety"), "Russet Burbank");
        let payload = draft.to_payload(&PLANT_PROTECTIONS).unwrap();
        assert_eq!(payload["variety"], json!("Russet Burbank"));
    }

    #[test]
    fn test_datetime_round_trip_through_input_format() {
        let record = Record::from_value(json!({"date": "2024-05-01 12:30:00", "location": "X"})).unwrap();
        let draft = Draft::from_record(&WEATHER_DATA, &record);
        assert_eq!(draft.get("date"), "2024-05-01T12:30");
    }
}
