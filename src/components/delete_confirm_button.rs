//! Delete Confirm Button Component
//!
//! Delete button that asks first when the collection wants confirmation.

use leptos::prelude::*;

/// Inline delete button
///
/// With `confirm` set, the first click shows "Delete?" with ✓/✗ buttons and
/// only ✓ runs `on_confirm`. Without it, a click deletes right away.
#[component]
pub fn DeleteConfirmButton(
    #[prop(optional)] confirm: bool,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);

    view! {
        <Show when=move || !asking.get()>
            <button
                class="delete-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    if confirm {
                        set_asking.set(true);
                    } else {
                        on_confirm.run(());
                    }
                }
            >
                "Delete"
            </button>
        </Show>
        <Show when=move || asking.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    class="confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                        on_confirm.run(());
                    }
                >
                    "✓"
                </button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                    }
                >
                    "✗"
                </button>
            </span>
        </Show>
    }
}
