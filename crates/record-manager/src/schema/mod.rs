//! Collection Schemas
//!
//! Declarative description of one REST collection: its fields, its filters
//! and the per-collection policies the manager honours.

mod collections;

pub use collections::{
    all, find, CULTIVATION_TECHNIQUES, FIELD_TRIALS, PLANT_PROTECTIONS, POTATO_VARIETIES,
    STORAGE_CONDITIONS, VARIETIES_COLLECTION, WEATHER_DATA,
};

/// Input type of a form field, which also drives payload conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    LongText,
    Integer,
    Float,
    /// `YYYY-MM-DD`
    Date,
    /// Sent as `YYYY-MM-DDTHH:MM:SS`
    DateTime,
    Url,
    /// Foreign key submitted as the related record's display value
    Reference {
        collection: &'static str,
        display_field: &'static str,
    },
}

impl FieldKind {
    /// HTML input type for the field
    pub fn input_type(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::LongText | FieldKind::Reference { .. } => "text",
            FieldKind::Integer | FieldKind::Float => "number",
            FieldKind::Date => "date",
            FieldKind::DateTime => "datetime-local",
            FieldKind::Url => "url",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }
}

/// One filter input and the query parameter it maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Query parameter (or record lookup path for local filters)
    pub param: &'static str,
}

/// When a filter edit triggers a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPolicy {
    /// On every keystroke
    Immediate,
    /// Only on an explicit "Filter" action
    Deferred,
}

/// How active filters are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEncoding {
    /// One query parameter per filter
    Params,
    /// All values joined with a space into `search`
    Search,
    /// Case-insensitive substring match on the fetched page, nothing sent
    Local,
}

/// Rendering hint for the record list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Table,
    Cards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionSchema {
    /// REST collection name under the API base
    pub collection: &'static str,
    pub title: &'static str,
    /// Singular noun used on buttons ("Add Field Trial")
    pub noun: &'static str,
    pub fields: &'static [FieldSpec],
    pub filters: &'static [FilterSpec],
    pub filter_policy: FilterPolicy,
    pub filter_encoding: FilterEncoding,
    /// Ask before deleting
    pub confirm_delete: bool,
    /// Merge mutation results into the shown page before the re-list
    pub optimistic: bool,
    /// Fields the user may sort the shown page by
    pub sortable: &'static [&'static str],
    pub layout: Layout,
}

impl CollectionSchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn filter(&self, key: &str) -> Option<&'static FilterSpec> {
        self.filters.iter().find(|f| f.key == key)
    }

    /// Related collection used for autocomplete, if any field references one
    pub fn reference_collection(&self) -> Option<&'static str> {
        self.fields.iter().find_map(|f| match f.kind {
            FieldKind::Reference { collection, .. } => Some(collection),
            _ => None,
        })
    }

    /// Field whose value headlines a card
    pub fn headline_field(&self) -> &'static str {
        self.fields
            .iter()
            .find(|f| matches!(f.kind, FieldKind::Reference { .. }))
            .or_else(|| self.fields.first())
            .map(|f| f.name)
            .unwrap_or("id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_collection() {
        assert_eq!(FIELD_TRIALS.reference_collection(), Some(VARIETIES_COLLECTION));
        assert_eq!(WEATHER_DATA.reference_collection(), None);
        assert_eq!(POTATO_VARIETIES.reference_collection(), None);
    }

    #[test]
    fn test_headline_field() {
        assert_eq!(PLANT_PROTECTIONS.headline_field(), "variety");
        assert_eq!(POTATO_VARIETIES.headline_field(), "name");
    }

    #[test]
    fn test_input_types() {
        assert_eq!(FieldKind::DateTime.input_type(), "datetime-local");
        assert_eq!(FieldKind::Float.input_type(), "number");
        assert_eq!(
            FieldKind::Reference { collection: VARIETIES_COLLECTION, display_field: "name" }.input_type(),
            "text"
        );
    }
}
