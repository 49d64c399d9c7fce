//! Collection registry and public API flows against the in-memory service.

use std::rc::Rc;

use record_manager::schema::{self, FIELD_TRIALS, PLANT_PROTECTIONS, POTATO_VARIETIES};
use record_manager::{
    ActionService, DataService, Draft, EditMode, FieldKind, FilterEncoding, FilterPolicy, InMemoryDataService,
    ListOutcome, RecordManager, SearchableService, SuggestionProvider,
};
use serde_json::json;

#[test]
fn test_registry_is_complete_and_consistent() {
    let names: Vec<_> = schema::all().iter().map(|s| s.collection).collect();
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

    for s in schema::all() {
        assert!(schema::find(s.collection).is_some());
        for filter in s.filters {
            if s.filter_encoding == FilterEncoding::Local {
                assert!(s.field(filter.param).is_some(), "{} filters on a missing field", s.collection);
            }
        }
        for field in s.sortable {
            assert!(s.field(field).is_some(), "{} sorts on a missing field", s.collection);
        }
        if let Some(reference) = s.reference_collection() {
            assert_eq!(reference, POTATO_VARIETIES.collection);
        }
    }
    assert!(schema::find("reports").is_none());
}

#[test]
fn test_immediate_collections() {
    let immediate: Vec<_> = schema::all()
        .iter()
        .filter(|s| s.filter_policy == FilterPolicy::Immediate)
        .map(|s| s.collection)
        .collect();
    assert_eq!(immediate, vec!["fieldtrials", "plantprotections"]);
}

#[tokio::test]
async fn test_plant_protection_shows_nested_variety_name() {
    let svc = Rc::new(InMemoryDataService::new());
    svc.seed(
        "plantprotections",
        vec![json!({
            "pests": "Colorado beetle",
            "biological_measures": "Bt spray",
            "application_date": "2024-06-10",
            "results": "fewer larvae",
            "variety": {"id": 4, "name": "Gala", "year": 1902}
        })],
    );
    let manager = RecordManager::new(&PLANT_PROTECTIONS, svc.clone() as Rc<dyn DataService>, 10);

    manager.set_filter("variety", "Gala").await.unwrap().unwrap();
    let snap = manager.snapshot();
    assert_eq!(snap.records.len(), 1);
    assert_eq!(snap.records[0].display("variety"), "Gala");

    // editing a nested reference starts from the name, not the object
    manager.begin_edit(&snap.records[0]);
    assert_eq!(manager.snapshot().draft.get("variety"), "Gala");
}

#[tokio::test]
async fn test_autocomplete_feeds_the_form() {
    let svc = Rc::new(InMemoryDataService::new());
    svc.seed(
        "potato-varieties",
        vec![json!({"name": "Russet Burbank", "year": 1902}), json!({"name": "Yukon Gold", "year": 1980})],
    );
    let field = FIELD_TRIALS.field("variety").unwrap();
    assert!(matches!(field.kind, FieldKind::Reference { .. }));

    let provider = SuggestionProvider::for_field(svc.clone() as Rc<dyn SearchableService>, field).unwrap();
    let manager = RecordManager::new(&FIELD_TRIALS, svc.clone() as Rc<dyn DataService>, 10);
    manager.mount().await.unwrap();
    assert_eq!(manager.snapshot().reference_options.len(), 2);

    provider.query("yukon").await.unwrap();
    let choice = provider.suggestions().remove(0);
    manager.set_draft_field("variety", &provider.select(&choice));
    for (name, value) in [("date", "2024-07-01"), ("location", "Idaho Falls"), ("conditions", "irrigated"), ("results", "42 t/ha")] {
        manager.set_draft_field(name, value);
    }

    let saved = manager.submit().await.unwrap();
    assert_eq!(saved.display("variety"), "Yukon Gold");
    assert_eq!(manager.snapshot().mode, EditMode::Create);
}

#[tokio::test]
async fn test_featured_varieties_and_detail() {
    let svc = Rc::new(InMemoryDataService::new());
    let seeded = svc.seed(
        "potato-varieties",
        (1..=5).map(|i| json!({"name": format!("Variety {}", i), "year": 2000 + i})).collect(),
    );

    let featured = svc.action("potato-varieties", "random").await.unwrap();
    assert_eq!(featured.len(), 3);

    let manager = RecordManager::new(&POTATO_VARIETIES, svc.clone() as Rc<dyn DataService>, 10);
    let detail = manager.retrieve(&seeded[4].id().unwrap()).await.unwrap();
    assert_eq!(detail.display("name"), "Variety 5");
}

#[tokio::test]
async fn test_variety_requires_link() {
    let svc = Rc::new(InMemoryDataService::new());
    let manager = RecordManager::new(&POTATO_VARIETIES, svc.clone() as Rc<dyn DataService>, 10);
    let draft = Draft::empty(&POTATO_VARIETIES).with("name", "Kennebec").with("year", "1948");

    assert!(manager.create(&draft).await.is_err());
    assert_eq!(svc.call_count(), 0);

    let draft = draft.with("link", "https://example.org/kennebec");
    manager.create(&draft).await.unwrap();
    let outcome = manager.list().await.unwrap();
    assert_eq!(outcome, ListOutcome::Applied { total_pages: 1, shown: 1 });
}
