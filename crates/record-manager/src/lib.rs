//! Record Manager
//!
//! Generic list/filter/paginate/mutate state for the potato records REST
//! collections. Layers:
//! - domain: records, drafts, filters, pagination, edit state
//! - schema: declarative per-collection configuration
//! - service: the REST contract and its implementations
//! - manager / suggest: the stateful pieces a page binds to

pub mod config;
pub mod domain;
pub mod error;
pub mod schema;
pub mod service;

mod manager;
mod suggest;

pub use config::ClientConfig;
pub use domain::{
    display_value, Draft, EditMode, FilterSet, Notice, NoticeKind, Page, PageCursor, Record, RecordId, Sort,
    SortDirection, DEFAULT_PAGE_SIZE,
};
pub use error::{Error, Result};
pub use manager::{ListOutcome, ManagerSnapshot, RecordManager};
pub use schema::{CollectionSchema, FieldKind, FieldSpec, FilterEncoding, FilterPolicy, FilterSpec, Layout};
pub use service::{ActionService, DataService, HttpDataService, InMemoryDataService, ListQuery, SearchableService};
pub use suggest::{SuggestionOutcome, SuggestionProvider};
