//! Potato Records Frontend App
//!
//! Navigation bar over one page at a time: the home page or a record page.

use leptos::prelude::*;
use reactive_stores::Store;
use record_manager::{schema, HttpDataService};

use crate::components::{HomePage, NavBar, RecordPage};
use crate::config::{client_config, load_last_tab, save_last_tab};
use crate::context::AppContext;
use crate::store::{AppState, AppStateStoreFields, Tab};

#[component]
pub fn App() -> impl IntoView {
    let config = client_config();
    let service = match HttpDataService::new(&config) {
        Ok(service) => service,
        Err(e) => {
            log::error!("[APP] bad API base {:?}: {}", config.base_url, e);
            return view! {
                <div class="status-banner error">{format!("Cannot reach the records API: {}", e)}</div>
            }
            .into_any();
        }
    };
    log::info!("[APP] API base {}", service.base());

    provide_context(AppContext::new(service, config.page_size));

    let initial_tab = load_last_tab().map(|key| Tab::from_key(&key)).unwrap_or_default();
    let store = Store::new(AppState::new(initial_tab));
    provide_context(store);

    // Remember the open tab across reloads
    Effect::new(move |_| {
        save_last_tab(store.active_tab().get().key());
    });

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                {move || match store.active_tab().get() {
                    Tab::Home => view! { <HomePage /> }.into_any(),
                    Tab::Collection(collection) => schema::find(collection)
                        .map(|schema| view! { <RecordPage schema=schema /> })
                        .into_any(),
                }}
            </main>
        </div>
    }
    .into_any()
}
