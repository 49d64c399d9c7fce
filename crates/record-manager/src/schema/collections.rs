//! The six record collections exposed by the backend.

use super::{
    CollectionSchema, FieldKind, FieldSpec, FilterEncoding, FilterPolicy, FilterSpec, Layout,
};

pub const VARIETIES_COLLECTION: &str = "potato-varieties";

const VARIETY_REF: FieldKind = FieldKind::Reference {
    collection: VARIETIES_COLLECTION,
    display_field: "name",
};

const VARIETY_FILTER: FilterSpec = FilterSpec { key: "variety", label: "Variety", param: "variety__name" };

pub static POTATO_VARIETIES: CollectionSchema = CollectionSchema {
    collection: VARIETIES_COLLECTION,
    title: "Potato Varieties",
    noun: "Variety",
    fields: &[
        FieldSpec::required("name", "Name", FieldKind::Text),
        FieldSpec::required("year", "Year", FieldKind::Integer),
        FieldSpec::optional("patent_number", "Patent Number", FieldKind::Text),
        FieldSpec::optional("description", "Description", FieldKind::LongText),
        FieldSpec::optional("characteristics", "Characteristics", FieldKind::LongText),
        FieldSpec::required("link", "Link", FieldKind::Url),
    ],
    filters: &[
        FilterSpec { key: "name", label: "Name", param: "name" },
        FilterSpec { key: "year", label: "Year", param: "year" },
        FilterSpec { key: "patent_number", label: "Patent Number", param: "patent_number" },
        FilterSpec { key: "description", label: "Description", param: "description" },
    ],
    filter_policy: FilterPolicy::Deferred,
    filter_encoding: FilterEncoding::Search,
    confirm_delete: false,
    optimistic: false,
    sortable: &["name", "year"],
    layout: Layout::Cards,
};

pub static FIELD_TRIALS: CollectionSchema = CollectionSchema {
    collection: "fieldtrials",
    title: "Field Trials",
    noun: "Field Trial",
    fields: &[
        FieldSpec::required("date", "Date", FieldKind::Date),
        FieldSpec::required("location", "Location", FieldKind::Text),
        FieldSpec::required("conditions", "Conditions", FieldKind::LongText),
        FieldSpec::required("results", "Results", FieldKind::LongText),
        FieldSpec::required("variety", "Variety", VARIETY_REF),
    ],
    filters: &[
        FilterSpec { key: "location", label: "Location", param: "location" },
        VARIETY_FILTER,
    ],
    filter_policy: FilterPolicy::Immediate,
    filter_encoding: FilterEncoding::Params,
    confirm_delete: true,
    optimistic: false,
    sortable: &["date", "location"],
    layout: Layout::Cards,
};

pub static PLANT_PROTECTIONS: CollectionSchema = CollectionSchema {
    collection: "plantprotections",
    title: "Plant Protection",
    noun: "Plant Protection",
    fields: &[
        FieldSpec::required("pests", "Pests", FieldKind::Text),
        FieldSpec::required("biological_measures", "Biological Measures", FieldKind::LongText),
        FieldSpec::required("application_date", "Application Date", FieldKind::Date),
        FieldSpec::required("results", "Results", FieldKind::LongText),
        FieldSpec::required("variety", "Variety", VARIETY_REF),
    ],
    filters: &[
        VARIETY_FILTER,
        FilterSpec { key: "pests", label: "Pests", param: "pests" },
    ],
    filter_policy: FilterPolicy::Immediate,
    filter_encoding: FilterEncoding::Params,
    confirm_delete: false,
    optimistic: false,
    sortable: &["application_date"],
    layout: Layout::Cards,
};

pub static CULTIVATION_TECHNIQUES: CollectionSchema = CollectionSchema {
    collection: "cultivationtechniques",
    title: "Plant Care",
    noun: "Technique",
    fields: &[
        FieldSpec::required("variety", "Variety", VARIETY_REF),
        FieldSpec::required("technique", "Technique", FieldKind::Text),
        FieldSpec::required("application_date", "Application Date", FieldKind::Date),
        FieldSpec::required("results", "Results", FieldKind::LongText),
    ],
    filters: &[VARIETY_FILTER],
    filter_policy: FilterPolicy::Deferred,
    filter_encoding: FilterEncoding::Params,
    confirm_delete: false,
    optimistic: false,
    sortable: &["technique", "application_date"],
    layout: Layout::Cards,
};

pub static STORAGE_CONDITIONS: CollectionSchema = CollectionSchema {
    collection: "storageconditions",
    title: "Storage Conditions",
    noun: "Storage Condition",
    fields: &[
        FieldSpec::required("variety", "Variety", VARIETY_REF),
        FieldSpec::required("temperature", "Temperature", FieldKind::Float),
        FieldSpec::required("humidity", "Humidity", FieldKind::Float),
        FieldSpec::required("start_date", "Start Date", FieldKind::Date),
        FieldSpec::required("end_date", "End Date", FieldKind::Date),
    ],
    filters: &[VARIETY_FILTER],
    filter_policy: FilterPolicy::Deferred,
    filter_encoding: FilterEncoding::Params,
    confirm_delete: true,
    optimistic: false,
    sortable: &["start_date", "end_date"],
    layout: Layout::Table,
};

pub static WEATHER_DATA: CollectionSchema = CollectionSchema {
    collection: "weatherdata",
    title: "Climate Data",
    noun: "Record",
    fields: &[
        FieldSpec::required("location", "Location", FieldKind::Text),
        FieldSpec::required("date", "Date", FieldKind::DateTime),
        FieldSpec::required("temperature", "Temperature", FieldKind::Float),
        FieldSpec::required("humidity", "Humidity", FieldKind::Float),
        FieldSpec::required("precipitation", "Precipitation", FieldKind::Float),
    ],
    filters: &[FilterSpec { key: "location", label: "Location", param: "location" }],
    filter_policy: FilterPolicy::Deferred,
    filter_encoding: FilterEncoding::Local,
    confirm_delete: false,
    optimistic: true,
    sortable: &["location", "date"],
    layout: Layout::Table,
};

static ALL: [&CollectionSchema; 6] = [
    &POTATO_VARIETIES,
    &FIELD_TRIALS,
    &PLANT_PROTECTIONS,
    &CULTIVATION_TECHNIQUES,
    &STORAGE_CONDITIONS,
    &WEATHER_DATA,
];

/// Every registered collection, in navigation order
pub fn all() -> &'static [&'static CollectionSchema] {
    &ALL
}

/// Look a schema up by collection name
pub fn find(collection: &str) -> Option<&'static CollectionSchema> {
    ALL.iter().copied().find(|s| s.collection == collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_complete() {
        let names: Vec<_> = all().iter().map(|s| s.collection).collect();
        assert_eq!(
            names,
            vec![
                "potato-varieties",
                "fieldtrials",
                "plantprotections",
                "cultivationtechniques",
                "storageconditions",
                "weatherdata"
            ]
        );
        assert!(find("fieldtrials").is_some());
        assert!(find("reports").is_none());
    }

    #[test]
    fn test_both_filter_policies_in_use() {
        let immediate = all().iter().filter(|s| s.filter_policy == FilterPolicy::Immediate).count();
        assert_eq!(immediate, 2);
        assert_eq!(all().iter().filter(|s| s.confirm_delete).count(), 2);
    }

    #[test]
    fn test_filters_reference_declared_sort_fields() {
        for schema in all() {
            for field in schema.sortable {
                assert!(schema.field(field).is_some(), "{} sorts by unknown {}", schema.collection, field);
            }
        }
    }
}
