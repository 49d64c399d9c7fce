//! Translating the Filter Set into wire parameters or local predicates.

use crate::domain::{FilterSet, Record};
use crate::schema::{CollectionSchema, FilterEncoding};
use crate::service::ListQuery;

/// List request for the given filters and page
pub(crate) fn build_query(schema: &CollectionSchema, filters: &FilterSet, page: u32, page_size: u32) -> ListQuery {
    let mut query = ListQuery::new();
    match schema.filter_encoding {
        FilterEncoding::Params => {
            for (key, value) in filters.active() {
                match schema.filter(key) {
                    Some(spec) => query = query.with_param(spec.param, value),
                    None => log::warn!("[{}] ignoring unknown filter {:?}", schema.collection, key),
                }
            }
        }
        FilterEncoding::Search => {
            // declaration order, not map order, so the search text is stable
            let terms: Vec<&str> = schema
                .filters
                .iter()
                .map(|spec| filters.get(spec.key).trim())
                .filter(|v| !v.is_empty())
                .collect();
            if !terms.is_empty() {
                query = query.with_param("search", terms.join(" "));
            }
        }
        FilterEncoding::Local => {}
    }
    query.with_page(page, page_size)
}

/// Client-side filtering for `FilterEncoding::Local` schemas
pub(crate) fn local_filter(schema: &CollectionSchema, filters: &FilterSet, records: &[Record]) -> Vec<Record> {
    if schema.filter_encoding != FilterEncoding::Local {
        return records.to_vec();
    }
    let active: Vec<(&str, String)> = filters
        .active()
        .filter_map(|(key, value)| schema.filter(key).map(|spec| (spec.param, value.to_lowercase())))
        .collect();
    records
        .iter()
        .filter(|record| {
            active.iter().all(|(path, needle)| {
                record
                    .lookup(path)
                    .map(|v| v.to_lowercase().contains(needle.as_str()))
                    .unwrap_or(false)
            })
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FIELD_TRIALS, POTATO_VARIETIES, WEATHER_DATA};
    use serde_json::json;

    #[test]
    fn test_params_encoding_maps_keys() {
        let mut filters = FilterSet::new();
        filters.set("variety", "Gala");
        filters.set("location", "");
        let query = build_query(&FIELD_TRIALS, &filters, 2, 10);
        assert_eq!(query.params, vec![("variety__name".to_string(), "Gala".to_string())]);
        assert_eq!(query.page, Some(2));
    }

    #[test]
    fn test_search_encoding_joins_in_declaration_order() {
        let mut filters = FilterSet::new();
        filters.set("description", "waxy");
        filters.set("name", "Russet");
        filters.set("year", " ");
        let query = build_query(&POTATO_VARIETIES, &filters, 1, 10);
        assert_eq!(query.param("search"), Some("Russet waxy"));
    }

    #[test]
    fn test_local_encoding_sends_nothing_and_filters_locally() {
        let mut filters = FilterSet::new();
        filters.set("location", "field");
        let query = build_query(&WEATHER_DATA, &filters, 1, 10);
        assert!(query.params.is_empty());

        let records: Vec<Record> = vec![
            json!({"id": 1, "location": "North Field"}),
            json!({"id": 2, "location": "Greenhouse"}),
            json!({"id": 3}),
        ]
        .into_iter()
        .filter_map(Record::from_value)
        .collect();
        let shown = local_filter(&WEATHER_DATA, &filters, &records);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].display("location"), "North Field");
    }
}
