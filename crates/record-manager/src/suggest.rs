//! Suggestion Provider
//!
//! Autocomplete lookups against a related collection. Each keystroke issues
//! a `search` query; only the latest query may replace the suggestions.
//! Selecting a suggestion yields its display value (the variety name), which
//! is what the backend's name-keyed relations expect.

use std::cell::RefCell;
use std::rc::Rc;

use crate::domain::Record;
use crate::error::Result;
use crate::schema::{FieldKind, FieldSpec};
use crate::service::SearchableService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Suggestions replaced with this many entries
    Applied(usize),
    /// Blank input; suggestions cleared without a request
    Cleared,
    /// A newer query was issued first
    Superseded,
}

#[derive(Default)]
struct SuggestionState {
    latest: u64,
    suggestions: Vec<Record>,
}

pub struct SuggestionProvider {
    service: Rc<dyn SearchableService>,
    collection: &'static str,
    display_field: &'static str,
    state: RefCell<SuggestionState>,
}

impl SuggestionProvider {
    pub fn new(service: Rc<dyn SearchableService>, collection: &'static str, display_field: &'static str) -> Self {
        Self { service, collection, display_field, state: RefCell::new(SuggestionState::default()) }
    }

    /// Provider for a reference field; `None` for any other kind
    pub fn for_field(service: Rc<dyn SearchableService>, field: &FieldSpec) -> Option<Self> {
        match field.kind {
            FieldKind::Reference { collection, display_field } => Some(Self::new(service, collection, display_field)),
            _ => None,
        }
    }

    pub fn collection(&self) -> &'static str {
        self.collection
    }

    pub async fn query(&self, text: &str) -> Result<SuggestionOutcome> {
        let ticket = {
            let mut st = self.state.borrow_mut();
            st.latest += 1;
            if text.trim().is_empty() {
                st.suggestions.clear();
                return Ok(SuggestionOutcome::Cleared);
            }
            st.latest
        };

        let result = self.service.search(self.collection, text.trim()).await;

        let mut st = self.state.borrow_mut();
        if ticket != st.latest {
            return Ok(SuggestionOutcome::Superseded);
        }
        match result {
            Ok(page) => {
                st.suggestions = page.results;
                Ok(SuggestionOutcome::Applied(st.suggestions.len()))
            }
            Err(e) => {
                log::error!("[suggest:{}] search {:?} failed: {}", self.collection, text, e);
                st.suggestions.clear();
                Err(e)
            }
        }
    }

    pub fn suggestions(&self) -> Vec<Record> {
        self.state.borrow().suggestions.clone()
    }

    /// Display values of the current suggestions
    pub fn labels(&self) -> Vec<String> {
        self.state.borrow().suggestions.iter().map(|r| r.display(self.display_field)).collect()
    }

    /// Value to store in the bound draft field; closes the list
    pub fn select(&self, suggestion: &Record) -> String {
        self.clear();
        suggestion.display(self.display_field)
    }

    /// Drop current suggestions and any in-flight query
    pub fn clear(&self) {
        let mut st = self.state.borrow_mut();
        st.latest += 1;
        st.suggestions.clear();
    }
}
