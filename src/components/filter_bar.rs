//! Filter Bar Component
//!
//! One text input per schema filter. Immediate collections refetch on every
//! keystroke; deferred ones wait for the Filter button. Locally filtered
//! collections narrow the held page as you type.

use leptos::prelude::*;
use record_manager::{CollectionSchema, FilterEncoding, FilterPolicy, ManagerSnapshot};

use crate::context::{spawn_manager, ManagerHandle};

#[component]
pub fn FilterBar(
    schema: &'static CollectionSchema,
    snapshot: RwSignal<ManagerSnapshot>,
    manager: ManagerHandle,
) -> impl IntoView {
    let deferred = schema.filter_policy == FilterPolicy::Deferred && schema.filter_encoding != FilterEncoding::Local;

    let on_apply = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_manager(manager, |m| async move {
            let _ = m.apply_filters().await;
        });
    };

    let on_clear = move |_: web_sys::MouseEvent| {
        spawn_manager(manager, |m| async move {
            let _ = m.clear_filters().await;
        });
    };

    view! {
        <form class="filter-bar" on:submit=on_apply>
            {schema
                .filters
                .iter()
                .map(|filter| {
                    let key = filter.key;
                    view! {
                        <label class="filter-field">
                            <span>{filter.label}</span>
                            <input
                                type="text"
                                placeholder=format!("Filter by {}", filter.label.to_lowercase())
                                prop:value=move || snapshot.with(|s| s.filters.get(key).to_string())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    spawn_manager(manager, move |m| async move {
                                        let _ = m.set_filter(key, &value).await;
                                    });
                                }
                            />
                        </label>
                    }
                })
                .collect_view()}
            <Show when=move || deferred>
                <button type="submit">"Filter"</button>
            </Show>
            <button
                type="button"
                class="cancel-btn"
                disabled=move || snapshot.with(|s| s.filters.is_unfiltered())
                on:click=on_clear
            >
                "Clear"
            </button>
        </form>
    }
}
