//! Record Page Component
//!
//! One collection's page: filters, form, list and pagination, all driven by
//! a single record manager. The manager pushes snapshots into a signal; the
//! child components only read that signal and call back into the manager.

use std::rc::Rc;

use leptos::prelude::*;
use record_manager::{schema::VARIETIES_COLLECTION, CollectionSchema};

use crate::components::{FilterBar, Pagination, RecordForm, RecordList, StatusBanner, VarietyDetail};
use crate::context::{spawn_manager, use_app_context, with_manager};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn RecordPage(schema: &'static CollectionSchema) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let Some(manager) = ctx.manager(schema) else {
        return view! { <p class="empty-hint">"No connection to the records API"</p> }.into_any();
    };
    let snapshot = RwSignal::new(manager.snapshot());
    manager.set_observer(move |snap| {
        let _ = snapshot.try_set(snap);
    });
    let manager = StoredValue::new_local(Rc::new(manager));

    log::debug!("[PAGE] mounting {}", schema.collection);
    spawn_manager(manager, |m| async move {
        let _ = m.mount().await;
    });
    on_cleanup(move || with_manager(manager, |m| m.detach()));

    let detail = move || {
        if schema.collection != VARIETIES_COLLECTION {
            return None;
        }
        store.detail_id().get().map(|id| view! { <VarietyDetail id=id manager=manager /> })
    };

    view! {
        <section class="record-page">
            <h1>{schema.title}</h1>
            <StatusBanner snapshot=snapshot manager=manager />
            {detail}
            <FilterBar schema=schema snapshot=snapshot manager=manager />
            <RecordForm schema=schema snapshot=snapshot manager=manager />
            <RecordList schema=schema snapshot=snapshot manager=manager />
            <Pagination snapshot=snapshot manager=manager />
        </section>
    }
    .into_any()
}
