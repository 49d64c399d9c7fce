//! Record Form Component
//!
//! Create/edit form generated from the schema fields. The submit button
//! label and the Cancel button follow the edit mode.

use leptos::prelude::*;
use record_manager::{CollectionSchema, FieldKind, FieldSpec, ManagerSnapshot};

use crate::components::ReferenceAutocomplete;
use crate::context::{spawn_manager, with_manager, ManagerHandle};

#[component]
pub fn RecordForm(
    schema: &'static CollectionSchema,
    snapshot: RwSignal<ManagerSnapshot>,
    manager: ManagerHandle,
) -> impl IntoView {
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_manager(manager, |m| async move {
            let _ = m.submit().await;
        });
    };

    let heading = move || snapshot.with(|s| format!("{} {}", s.mode.action_label(), schema.noun));
    let editing = move || snapshot.with(|s| s.mode.is_editing());

    view! {
        <form class=move || if editing() { "record-form editing" } else { "record-form" } on:submit=on_submit>
            <h2>{heading}</h2>
            {schema
                .fields
                .iter()
                .map(|field| view! { <FieldInput field=field snapshot=snapshot manager=manager /> })
                .collect_view()}
            <div class="form-actions">
                <button type="submit" disabled=move || snapshot.with(|s| s.loading)>
                    {move || snapshot.with(|s| s.mode.action_label())}
                </button>
                <Show when=editing>
                    <button
                        type="button"
                        class="cancel-btn"
                        on:click=move |_| with_manager(manager, |m| m.cancel_edit())
                    >
                        "Cancel"
                    </button>
                </Show>
            </div>
        </form>
    }
}

/// One labelled input bound to a draft field
#[component]
fn FieldInput(
    field: &'static FieldSpec,
    snapshot: RwSignal<ManagerSnapshot>,
    manager: ManagerHandle,
) -> impl IntoView {
    let name = field.name;
    let value = Signal::derive(move || snapshot.with(|s| s.draft.get(name).to_string()));
    let set_value = move |text: String| with_manager(manager, |m| m.set_draft_field(name, &text));

    let control = match field.kind {
        FieldKind::LongText => view! {
            <textarea
                rows="3"
                prop:value=move || value.get()
                on:input=move |ev| set_value(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        FieldKind::Reference { .. } => {
            let options = Signal::derive(move || snapshot.with(|s| s.reference_options.clone()));
            view! {
                <ReferenceAutocomplete
                    field=field
                    value=value
                    options=options
                    on_change=Callback::new(set_value)
                />
            }
            .into_any()
        }
        kind => view! {
            <input
                type=kind.input_type()
                step=if kind == FieldKind::Float { Some("any") } else { None }
                required=field.required
                prop:value=move || value.get()
                on:input=move |ev| set_value(event_target_value(&ev))
            />
        }
        .into_any(),
    };

    view! {
        <label class="form-field">
            <span>{field.label} {field.required.then_some(" *")}</span>
            {control}
        </label>
    }
}
