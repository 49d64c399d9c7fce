//! Service Layer
//!
//! Access to the REST collections: the contract plus an HTTP and an
//! in-memory implementation.

mod traits;
mod http;
mod memory;

pub use traits::{ActionService, DataService, ListQuery, SearchableService};
pub use http::HttpDataService;
pub use memory::{Call, InMemoryDataService, Method};
