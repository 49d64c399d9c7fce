//! Variety Detail Component
//!
//! Full record of one variety, fetched by id.

use leptos::prelude::*;
use record_manager::{schema::POTATO_VARIETIES, FieldKind, Record, RecordId};

use crate::context::{spawn_manager, ManagerHandle};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn VarietyDetail(id: RecordId, manager: ManagerHandle) -> impl IntoView {
    let store = use_app_store();
    let record = RwSignal::new(None::<Record>);
    let (failed, set_failed) = signal(false);

    log::debug!("[DETAIL] loading variety {}", id);
    spawn_manager(manager, move |m| async move {
        match m.retrieve(&id).await {
            Ok(found) => {
                let _ = record.try_set(Some(found));
            }
            Err(_) => {
                let _ = set_failed.try_set(true);
            }
        }
    });

    let fields = move |r: Record| {
        POTATO_VARIETIES
            .fields
            .iter()
            .filter(|f| f.name != "name")
            .map(|f| {
                let text = r.display(f.name);
                let value = match f.kind {
                    FieldKind::Url if !text.is_empty() => view! {
                        <a href=text.clone() target="_blank" rel="noopener">"Learn more"</a>
                    }
                    .into_any(),
                    _ => text.into_any(),
                };
                view! {
                    <dt>{f.label}</dt>
                    <dd>{value}</dd>
                }
            })
            .collect_view()
    };

    view! {
        <aside class="variety-detail">
            <button class="cancel-btn" on:click=move |_| store.detail_id().set(None)>"Close"</button>
            {move || match record.get() {
                Some(r) => view! {
                    <h2>{r.display("name")}</h2>
                    <dl>{fields(r.clone())}</dl>
                }
                .into_any(),
                None if failed.get() => view! { <p class="empty-hint">"Variety not found"</p> }.into_any(),
                None => view! { <p class="empty-hint">"Loading..."</p> }.into_any(),
            }}
        </aside>
    }
}
