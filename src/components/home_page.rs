//! Home Page Component
//!
//! Landing page with a few randomly featured varieties.

use leptos::prelude::*;
use leptos::task::spawn_local;
use record_manager::{schema::VARIETIES_COLLECTION, Record};

use crate::context::use_app_context;
use crate::store::{store_show_variety, use_app_store};

#[component]
pub fn HomePage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let featured = RwSignal::new(Vec::<Record>::new());
    let (error, set_error) = signal(None::<String>);

    if let Some(service) = ctx.action_service() {
        spawn_local(async move {
            match service.action(VARIETIES_COLLECTION, "random").await {
                Ok(varieties) => {
                    log::debug!("[HOME] {} featured varieties", varieties.len());
                    let _ = featured.try_set(varieties);
                }
                Err(e) => {
                    log::error!("[HOME] featured varieties failed: {}", e);
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
        });
    }

    view! {
        <section class="home-page">
            <h1>"Potato Records"</h1>
            <p>"Variety catalog, field trials, treatments, storage and climate observations."</p>
            <h2>"Featured varieties"</h2>
            {move || error.get().map(|e| view! { <div class="status-banner error">{e}</div> })}
            <div class="record-cards">
                <For
                    each=move || featured.get()
                    key=|r| r.id().map(|id| id.to_string()).unwrap_or_default()
                    children=move |r| {
                        let id = r.id();
                        view! {
                            <div class="record-card">
                                <h3>{r.display("name")}</h3>
                                <p>{r.display("year")}</p>
                                <p>{r.display("description")}</p>
                                <button
                                    class="detail-btn"
                                    on:click=move |_| {
                                        if let Some(id) = id.clone() {
                                            store_show_variety(&store, id);
                                        }
                                    }
                                >
                                    "Details"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </section>
    }
}
