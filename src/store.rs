//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use record_manager::{schema, RecordId};

/// Top-level navigation target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    /// A record page, by collection name
    Collection(&'static str),
}

impl Tab {
    /// Value persisted between sessions
    pub fn key(&self) -> &'static str {
        match self {
            Tab::Home => "",
            Tab::Collection(collection) => *collection,
        }
    }

    pub fn from_key(key: &str) -> Tab {
        schema::find(key).map(|s| Tab::Collection(s.collection)).unwrap_or_default()
    }
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    pub active_tab: Tab,
    /// Variety shown in the detail panel
    pub detail_id: Option<RecordId>,
}

impl AppState {
    pub fn new(active_tab: Tab) -> Self {
        Self { active_tab, detail_id: None }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Switch tabs, closing any open detail panel
pub fn store_open_tab(store: &AppStore, tab: Tab) {
    store.detail_id().set(None);
    store.active_tab().set(tab);
}

/// Open the varieties tab on one variety
pub fn store_show_variety(store: &AppStore, id: RecordId) {
    store.active_tab().set(Tab::Collection(schema::VARIETIES_COLLECTION));
    store.detail_id().set(Some(id));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_key_round_trip() {
        assert_eq!(Tab::from_key("fieldtrials"), Tab::Collection("fieldtrials"));
        assert_eq!(Tab::from_key(Tab::Home.key()), Tab::Home);
        assert_eq!(Tab::from_key("reports"), Tab::Home);
    }
}
