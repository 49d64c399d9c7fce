//! In-Memory Data Service
//!
//! Mirrors the backend's list semantics (exact-match filter params,
//! case-insensitive multi-term `search`, page numbering that 404s past the
//! end) over plain vectors. Every call is recorded so callers can assert on
//! the traffic a manager produced.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use super::traits::{ActionService, DataService, ListQuery, SearchableService};
use crate::domain::{Page, Record, RecordId, DEFAULT_PAGE_SIZE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// One recorded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: Method,
    pub collection: String,
    /// Record id, action name or query pairs
    pub detail: String,
}

#[derive(Default)]
struct MemoryState {
    collections: HashMap<String, Vec<Record>>,
    next_id: i64,
    calls: Vec<Call>,
    fail_next: Option<Error>,
}

pub struct InMemoryDataService {
    state: RefCell<MemoryState>,
    page_size: u32,
}

impl Default for InMemoryDataService {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDataService {
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Page size used when a query does not carry one
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            state: RefCell::new(MemoryState { next_id: 1, ..Default::default() }),
            page_size: page_size.max(1),
        }
    }

    /// Insert objects with fresh integer ids; returns the stored records
    pub fn seed(&self, collection: &str, rows: Vec<Value>) -> Vec<Record> {
        let mut state = self.state.borrow_mut();
        let mut stored = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(mut record) = Record::from_value(row) else { continue };
            let id = state.next_id;
            state.next_id += 1;
            record.set("id", Value::from(id));
            state.collections.entry(collection.to_string()).or_default().push(record.clone());
            stored.push(record);
        }
        stored
    }

    /// Current contents of a collection
    pub fn records(&self, collection: &str) -> Vec<Record> {
        self.state.borrow().collections.get(collection).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    /// Make the next request fail with `error` (after it is recorded)
    pub fn fail_next(&self, error: Error) {
        self.state.borrow_mut().fail_next = Some(error);
    }

    fn record_call(&self, method: Method, collection: &str, detail: String) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(Call { method, collection: collection.to_string(), detail });
        match state.fail_next.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

fn query_detail(query: &ListQuery) -> String {
    query
        .to_pairs()
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Every whitespace/comma separated term must appear in some field
fn matches_search(record: &Record, text: &str) -> bool {
    let haystacks: Vec<String> = record
        .fields()
        .iter()
        .filter(|(k, _)| k.as_str() != "id")
        .map(|(k, _)| record.display(k).to_lowercase())
        .collect();
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .all(|term| {
            let term = term.to_lowercase();
            haystacks.iter().any(|h| h.contains(&term))
        })
}

fn matches_params(record: &Record, query: &ListQuery) -> bool {
    query.params.iter().all(|(key, value)| match key.as_str() {
        "search" => matches_search(record, value),
        "ordering" => true,
        path => record.lookup(path).as_deref() == Some(value.as_str()),
    })
}

#[async_trait(?Send)]
impl DataService for InMemoryDataService {
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Page<Record>> {
        self.record_call(Method::Get, collection, query_detail(query))?;
        let state = self.state.borrow();
        let matching: Vec<Record> = state
            .collections
            .get(collection)
            .map(|rows| rows.iter().filter(|r| matches_params(r, query)).cloned().collect())
            .unwrap_or_default();

        let page = query.page.unwrap_or(1).max(1) as usize;
        let size = query.page_size.unwrap_or(self.page_size).max(1) as usize;
        let start = (page - 1) * size;
        if page > 1 && start >= matching.len() {
            return Err(Error::NotFound(format!("{} page {}", collection, page)));
        }
        let results = matching.iter().skip(start).take(size).cloned().collect();
        Ok(Page { count: matching.len() as u64, results })
    }

    async fn retrieve(&self, collection: &str, id: &RecordId) -> Result<Record> {
        self.record_call(Method::Get, collection, id.to_string())?;
        self.state
            .borrow()
            .collections
            .get(collection)
            .and_then(|rows| rows.iter().find(|r| r.id().as_ref() == Some(id)).cloned())
            .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))
    }

    async fn create(&self, collection: &str, body: &Value) -> Result<Record> {
        self.record_call(Method::Post, collection, String::new())?;
        let mut record = Record::from_value(body.clone())
            .ok_or_else(|| Error::Status { status: 400, body: "expected a JSON object".to_string() })?;
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        record.set("id", Value::from(id));
        state.collections.entry(collection.to_string()).or_default().push(record.clone());
        Ok(record)
    }

    async fn update(&self, collection: &str, id: &RecordId, body: &Value) -> Result<Record> {
        self.record_call(Method::Put, collection, id.to_string())?;
        let mut replacement = Record::from_value(body.clone())
            .ok_or_else(|| Error::Status { status: 400, body: "expected a JSON object".to_string() })?;
        let mut state = self.state.borrow_mut();
        let slot = state
            .collections
            .get_mut(collection)
            .and_then(|rows| rows.iter_mut().find(|r| r.id().as_ref() == Some(id)))
            .ok_or_else(|| Error::NotFound(format!("{}/{}", collection, id)))?;
        let id_value = slot.get("id").cloned().unwrap_or(Value::Null);
        replacement.set("id", id_value);
        *slot = replacement.clone();
        Ok(replacement)
    }

    async fn delete(&self, collection: &str, id: &RecordId) -> Result<()> {
        self.record_call(Method::Delete, collection, id.to_string())?;
        let mut state = self.state.borrow_mut();
        let rows = state.collections.entry(collection.to_string()).or_default();
        let before = rows.len();
        rows.retain(|r| r.id().as_ref() != Some(id));
        if rows.len() == before {
            return Err(Error::NotFound(format!("{}/{}", collection, id)));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl SearchableService for InMemoryDataService {}

#[async_trait(?Send)]
impl ActionService for InMemoryDataService {
    /// Only `random` is known; it answers with the first three records
    async fn action(&self, collection: &str, action: &str) -> Result<Vec<Record>> {
        self.record_call(Method::Get, collection, action.to_string())?;
        match action {
            "random" => Ok(self.records(collection).into_iter().take(3).collect()),
            other => Err(Error::NotFound(format!("{}/{}", collection, other))),
        }
    }
}
