//! Record List Component
//!
//! Shown page of records as a table or as cards, with sortable headers and
//! per-record Edit/Delete actions.

use leptos::prelude::*;
use record_manager::{
    schema::VARIETIES_COLLECTION, CollectionSchema, FieldKind, FieldSpec, Layout, ManagerSnapshot, Record,
};

use crate::components::DeleteConfirmButton;
use crate::context::{spawn_manager, with_manager, ManagerHandle};
use crate::store::{store_show_variety, use_app_store};

/// Rendered value of one field
fn field_value(record: &Record, field: &FieldSpec) -> AnyView {
    let text = record.display(field.name);
    match field.kind {
        FieldKind::Url if !text.is_empty() => {
            let href = text.clone();
            view! { <a href=href target="_blank" rel="noopener">{text}</a> }.into_any()
        }
        _ => text.into_any(),
    }
}

#[component]
pub fn RecordList(
    schema: &'static CollectionSchema,
    snapshot: RwSignal<ManagerSnapshot>,
    manager: ManagerHandle,
) -> impl IntoView {
    let store = use_app_store();

    let actions = move |record: Record| {
        let id = record.id();
        let detail_id = id.clone();
        view! {
            <div class="row-actions">
                {(schema.collection == VARIETIES_COLLECTION).then(|| view! {
                    <button
                        class="detail-btn"
                        on:click=move |_| {
                            if let Some(id) = detail_id.clone() {
                                store_show_variety(&store, id);
                            }
                        }
                    >
                        "Details"
                    </button>
                })}
                <button class="edit-btn" on:click=move |_| with_manager(manager, |m| m.begin_edit(&record))>
                    "Edit"
                </button>
                <DeleteConfirmButton
                    confirm=schema.confirm_delete
                    on_confirm=move |_| {
                        if let Some(id) = id.clone() {
                            spawn_manager(manager, move |m| async move {
                                let _ = m.remove(&id).await;
                            });
                        }
                    }
                />
            </div>
        }
    };

    let arrow = move |name: &'static str| {
        snapshot.with(|s| match &s.sort {
            Some(sort) if sort.field == name => sort.direction.arrow(),
            _ => "",
        })
    };

    let header = move |field: &'static FieldSpec| {
        if !schema.sortable.contains(&field.name) {
            return view! { <th>{field.label}</th> }.into_any();
        }
        let arrow = move || arrow(field.name);
        view! {
            <th class="sortable" on:click=move |_| with_manager(manager, |m| m.toggle_sort(field.name))>
                {field.label} " " {arrow}
            </th>
        }
        .into_any()
    };

    let body = move || {
        let (records, editing_id, loading) =
            snapshot.with(|s| (s.records.clone(), s.mode.editing_id(), s.loading));
        if records.is_empty() {
            let hint = if loading { "Loading...".to_string() } else { format!("No {} found", schema.title.to_lowercase()) };
            return view! { <p class="empty-hint">{hint}</p> }.into_any();
        }
        let is_editing = move |record: &Record| editing_id.is_some() && record.id() == editing_id;

        match schema.layout {
            Layout::Table => view! {
                <table class="record-table">
                    <thead>
                        <tr>
                            {schema.fields.iter().map(header).collect_view()}
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {records
                            .into_iter()
                            .map(|record| {
                                view! {
                                    <tr class=if is_editing(&record) { "editing" } else { "" }>
                                        {schema
                                            .fields
                                            .iter()
                                            .map(|f| view! { <td>{field_value(&record, f)}</td> })
                                            .collect_view()}
                                        <td>{actions(record.clone())}</td>
                                    </tr>
                                }
                            })
                            .collect_view()}
                    </tbody>
                </table>
            }
            .into_any(),
            Layout::Cards => {
                let headline = schema.headline_field();
                view! {
                    <div class="sort-bar">
                        {schema
                            .fields
                            .iter()
                            .filter(|f| schema.sortable.contains(&f.name))
                            .map(|f| view! {
                                <button
                                    type="button"
                                    class="sort-btn"
                                    on:click=move |_| with_manager(manager, |m| m.toggle_sort(f.name))
                                >
                                    {f.label} " " {move || arrow(f.name)}
                                </button>
                            })
                            .collect_view()}
                    </div>
                    <div class="record-cards">
                        {records
                            .into_iter()
                            .map(|record| {
                                view! {
                                    <div class=if is_editing(&record) { "record-card editing" } else { "record-card" }>
                                        <h3>{record.display(headline)}</h3>
                                        {schema
                                            .fields
                                            .iter()
                                            .filter(|f| f.name != headline)
                                            .map(|f| view! {
                                                <p><strong>{f.label} ": "</strong>{field_value(&record, f)}</p>
                                            })
                                            .collect_view()}
                                        {actions(record.clone())}
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
        }
    };

    view! {
        <div class="record-list">
            <p class="record-count">
                {move || snapshot.with(|s| format!("{} {}", s.total_count, schema.title.to_lowercase()))}
            </p>
            {body}
        </div>
    }
}
