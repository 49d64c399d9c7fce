//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::future::Future;
use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use record_manager::{
    ActionService, CollectionSchema, DataService, HttpDataService, RecordManager, SearchableService,
};

/// Manager of the mounted record page
pub type ManagerHandle = StoredValue<Rc<RecordManager>, LocalStorage>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// REST client shared by every page
    service: StoredValue<Rc<HttpDataService>, LocalStorage>,
    /// Records per page
    pub page_size: u32,
}

impl AppContext {
    pub fn new(service: HttpDataService, page_size: u32) -> Self {
        Self { service: StoredValue::new_local(Rc::new(service)), page_size }
    }

    fn http(&self) -> Option<Rc<HttpDataService>> {
        self.service.try_get_value()
    }

    pub fn data_service(&self) -> Option<Rc<dyn DataService>> {
        self.http().map(|s| s as Rc<dyn DataService>)
    }

    pub fn search_service(&self) -> Option<Rc<dyn SearchableService>> {
        self.http().map(|s| s as Rc<dyn SearchableService>)
    }

    pub fn action_service(&self) -> Option<Rc<dyn ActionService>> {
        self.http().map(|s| s as Rc<dyn ActionService>)
    }

    /// Fresh manager for `schema`, wired to the shared client
    pub fn manager(&self, schema: &'static CollectionSchema) -> Option<RecordManager> {
        self.data_service().map(|service| RecordManager::new(schema, service, self.page_size))
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Run an async manager operation on the local executor
pub fn spawn_manager<F, Fut>(handle: ManagerHandle, op: F)
where
    F: FnOnce(Rc<RecordManager>) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    if let Some(manager) = handle.try_get_value() {
        spawn_local(op(manager));
    }
}

/// Run a synchronous manager operation, if the page is still mounted
pub fn with_manager(handle: ManagerHandle, op: impl FnOnce(&RecordManager)) {
    if let Some(manager) = handle.try_get_value() {
        op(&manager);
    }
}
