//! Navigation Bar Component
//!
//! Tab bar for switching between the home page and the record pages.

use leptos::prelude::*;
use record_manager::schema;

use crate::store::{store_open_tab, use_app_store, AppStateStoreFields, Tab};

#[component]
pub fn NavBar() -> impl IntoView {
    let store = use_app_store();

    let tabs = std::iter::once((Tab::Home, "Home"))
        .chain(schema::all().iter().map(|s| (Tab::Collection(s.collection), s.title)));

    view! {
        <nav class="nav-bar">
            {tabs
                .map(|(tab, label)| {
                    let tab_class = move || {
                        if store.active_tab().get() == tab { "nav-tab active" } else { "nav-tab" }
                    };
                    view! {
                        <button class=tab_class on:click=move |_| store_open_tab(&store, tab)>
                            {label}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
