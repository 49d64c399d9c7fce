//! Service Layer - Core Traits
//!
//! Abstract interface to the REST backend. Implementations can talk HTTP or
//! keep everything in memory.
//!
//! Everything runs on one event loop, so futures are not required to be
//! `Send`.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Page, Record, RecordId};
use crate::error::Result;

/// Parameters of a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Filter / search parameters, already encoded for the wire
    pub params: Vec<(String, String)>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Autocomplete-style full-text query
    pub fn search(text: &str) -> Self {
        Self::new().with_param("search", text)
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Query string pairs in send order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.params.clone();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size".to_string(), size.to_string()));
        }
        pairs
    }
}

/// Core CRUD contract shared by every collection
#[async_trait(?Send)]
pub trait DataService {
    /// `GET {collection}/?...`
    async fn list(&self, collection: &str, query: &ListQuery) -> Result<Page<Record>>;

    /// `GET {collection}/{id}/`
    async fn retrieve(&self, collection: &str, id: &RecordId) -> Result<Record>;

    /// `POST {collection}/`
    async fn create(&self, collection: &str, body: &Value) -> Result<Record>;

    /// `PUT {collection}/{id}/`
    async fn update(&self, collection: &str, id: &RecordId, body: &Value) -> Result<Record>;

    /// `DELETE {collection}/{id}/`
    async fn delete(&self, collection: &str, id: &RecordId) -> Result<()>;
}

/// Extension for collections that support text search
#[async_trait(?Send)]
pub trait SearchableService: DataService {
    async fn search(&self, collection: &str, text: &str) -> Result<Page<Record>> {
        self.list(collection, &ListQuery::search(text)).await
    }
}

/// Extension for collection-level custom actions (`{collection}/{action}/`)
#[async_trait(?Send)]
pub trait ActionService: DataService {
    async fn action(&self, collection: &str, action: &str) -> Result<Vec<Record>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairs_order() {
        let query = ListQuery::new().with_param("location", "Boise").with_page(2, 10);
        assert_eq!(
            query.to_pairs(),
            vec![
                ("location".to_string(), "Boise".to_string()),
                ("page".to_string(), "2".to_string()),
                ("page_size".to_string(), "10".to_string()),
            ]
        );
        assert_eq!(query.param("location"), Some("Boise"));
        assert_eq!(ListQuery::search("Rus").param("search"), Some("Rus"));
    }
}
