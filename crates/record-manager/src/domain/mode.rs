//! Edit mode, notices and client-side sort state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::record::{Record, RecordId};

/// Which call a submit issues
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum EditMode {
    /// POST to the collection
    #[default]
    Create,
    /// PUT to `{collection}/{id}/`
    Edit(Record),
}

impl EditMode {
    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Edit(_))
    }

    /// Id of the record being edited
    pub fn editing_id(&self) -> Option<RecordId> {
        match self {
            EditMode::Create => None,
            EditMode::Edit(record) => record.id(),
        }
    }

    /// Submit button verb
    pub fn action_label(&self) -> &'static str {
        match self {
            EditMode::Create => "Add",
            EditMode::Edit(_) => "Update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Visible, dismissible status message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, message: message.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "↑",
            SortDirection::Desc => "↓",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Same field flips direction; a new field starts ascending
    pub fn toggled(current: Option<&Sort>, field: &str) -> Sort {
        let direction = match current {
            Some(s) if s.field == field && s.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Sort { field: field.to_string(), direction }
    }

    /// Stable sort of records by display value; numeric values compare numerically
    pub fn apply(&self, records: &mut [Record]) {
        records.sort_by(|a, b| {
            let ord = compare_display(&a.display(&self.field), &b.display(&self.field));
            match self.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
}

fn compare_display(a: &str, b: &str) -> Ordering {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rec(v: serde_json::Value) -> Record {
        Record::from_value(v).unwrap()
    }

    #[test]
    fn test_edit_mode_labels() {
        assert_eq!(EditMode::Create.action_label(), "Add");
        let mode = EditMode::Edit(rec(json!({"id": 5})));
        assert!(mode.is_editing());
        assert_eq!(mode.editing_id(), Some(RecordId::Int(5)));
        assert_eq!(mode.action_label(), "Update");
    }

    #[test]
    fn test_sort_toggle() {
        let first = Sort::toggled(None, "date");
        assert_eq!(first.direction, SortDirection::Asc);
        let second = Sort::toggled(Some(&first), "date");
        assert_eq!(second.direction, SortDirection::Desc);
        let other = Sort::toggled(Some(&second), "location");
        assert_eq!(other.direction, SortDirection::Asc);
    }

    #[test]
    fn test_sort_numeric_and_text() {
        let mut records = vec![
            rec(json!({"t": 9, "l": "b"})),
            rec(json!({"t": 10, "l": "a"})),
            rec(json!({"t": -2, "l": "c"})),
        ];
        Sort { field: "t".into(), direction: SortDirection::Asc }.apply(&mut records);
        let temps: Vec<_> = records.iter().map(|r| r.display("t")).collect();
        assert_eq!(temps, vec!["-2", "9", "10"]);

        Sort { field: "l".into(), direction: SortDirection::Desc }.apply(&mut records);
        assert_eq!(records[0].display("l"), "c");
    }
}
