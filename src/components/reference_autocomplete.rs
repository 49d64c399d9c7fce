//! Reference Autocomplete Component
//!
//! Text input for a field that names a record of another collection.
//! Typing queries the server; until the answer arrives the prefetched
//! reference options are fuzzy-matched locally.

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use record_manager::{FieldKind, FieldSpec, Record, SuggestionOutcome, SuggestionProvider};

use crate::context::use_app_context;

const MAX_SHOWN: usize = 5;

/// Whether a reference name is worth suggesting for the typed text: every
/// typed character, spaces aside, occurs in the name in the same order
/// ("rsbk" offers "Russet Burbank"). Case is ignored.
fn offers(typed: &str, name: &str) -> bool {
    let mut name = name.chars().flat_map(char::to_lowercase);
    typed
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .all(|wanted| name.any(|c| c == wanted))
}

/// Reference input with suggestions
///
/// Props:
/// - value: current draft value
/// - options: prefetched records of the referenced collection
/// - on_change: receives typed text and chosen display values alike
#[component]
pub fn ReferenceAutocomplete(
    field: &'static FieldSpec,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] options: Signal<Vec<Record>>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let display_field = match field.kind {
        FieldKind::Reference { display_field, .. } => display_field,
        _ => "name",
    };
    let provider = StoredValue::new_local(
        ctx.search_service()
            .and_then(|service| SuggestionProvider::for_field(service, field))
            .map(Rc::new),
    );
    let suggestions = RwSignal::new(Vec::<Record>::new());
    let (selected_idx, set_selected_idx) = signal(0usize);

    // Server answers first; local matches on the prefetched options otherwise
    let shown = move || {
        let server = suggestions.get();
        if !server.is_empty() {
            return server.into_iter().take(MAX_SHOWN).collect::<Vec<_>>();
        }
        let text = value.get();
        let text = text.trim();
        if text.is_empty() {
            return vec![];
        }
        options
            .get()
            .into_iter()
            .filter(|r| {
                let name = r.display(display_field);
                name != text && offers(text, &name)
            })
            .take(MAX_SHOWN)
            .collect()
    };

    let choose = move |record: Record| {
        let chosen = match provider.try_get_value().flatten() {
            Some(p) => p.select(&record),
            None => record.display(display_field),
        };
        suggestions.set(vec![]);
        set_selected_idx.set(0);
        on_change.run(chosen);
    };

    let on_input = move |ev: web_sys::Event| {
        let text = event_target_value(&ev);
        on_change.run(text.clone());
        set_selected_idx.set(0);
        let Some(p) = provider.try_get_value().flatten() else { return };
        spawn_local(async move {
            match p.query(&text).await {
                Ok(SuggestionOutcome::Superseded) => {}
                Ok(_) => suggestions.set(p.suggestions()),
                Err(_) => suggestions.set(vec![]),
            }
        });
    };

    let on_keydown = move |ev: web_sys::KeyboardEvent| {
        let sugg = shown();
        if sugg.is_empty() {
            return;
        }
        let sel = selected_idx.get();
        match ev.key().as_str() {
            "Tab" | "Enter" => {
                ev.prevent_default();
                if let Some(record) = sugg.get(sel) {
                    choose(record.clone());
                }
            }
            "ArrowDown" => {
                ev.prevent_default();
                if sel + 1 < sugg.len() {
                    set_selected_idx.set(sel + 1);
                }
            }
            "ArrowUp" => {
                ev.prevent_default();
                if sel > 0 {
                    set_selected_idx.set(sel - 1);
                }
            }
            "Escape" => {
                if let Some(p) = provider.try_get_value().flatten() {
                    p.clear();
                }
                suggestions.set(vec![]);
            }
            _ => {}
        }
    };

    view! {
        <div class="reference-input-wrapper">
            <input
                type="text"
                autocomplete="off"
                required=field.required
                placeholder=format!("Start typing a {}...", field.label.to_lowercase())
                prop:value=move || value.get()
                on:input=on_input
                on:keydown=on_keydown
            />

            {move || {
                let sugg = shown();
                if sugg.is_empty() {
                    return None;
                }
                let selected = selected_idx.get();
                Some(view! {
                    <div class="autocomplete-list">
                        {sugg
                            .into_iter()
                            .enumerate()
                            .map(|(i, record)| {
                                let label = record.display(display_field);
                                view! {
                                    <button
                                        type="button"
                                        class=if i == selected { "autocomplete-item selected" } else { "autocomplete-item" }
                                        on:click=move |ev| {
                                            ev.prevent_default();
                                            choose(record.clone());
                                        }
                                    >
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>
                })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::offers;

    #[test]
    fn test_offers_names_in_typed_order() {
        assert!(offers("rsbk", "Russet Burbank"));
        assert!(offers("RUS bur", "Russet Burbank"));
        assert!(offers("", "Gala"));
        assert!(offers("aa", "Gala"));
        assert!(!offers("aaa", "Gala"));
        assert!(!offers("yg", "Gala"));
    }
}
