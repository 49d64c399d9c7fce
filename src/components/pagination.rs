//! Pagination Component

use leptos::prelude::*;
use record_manager::ManagerSnapshot;

use crate::context::{spawn_manager, ManagerHandle};

/// Previous/Next controls with the current position
#[component]
pub fn Pagination(snapshot: RwSignal<ManagerSnapshot>, manager: ManagerHandle) -> impl IntoView {
    let cursor = move || snapshot.with(|s| s.cursor);

    let go_to = move |page: u32| {
        spawn_manager(manager, move |m| async move {
            // out-of-range pages are ignored by the manager
            if let Some(Err(e)) = m.change_page(page).await {
                log::warn!("[PAGINATION] page {} failed: {}", page, e);
            }
        });
    };

    view! {
        <div class="pagination">
            <button
                disabled=move || !cursor().has_previous() || snapshot.with(|s| s.loading)
                on:click=move |_| go_to(cursor().page.saturating_sub(1))
            >
                "Previous"
            </button>
            <span class="page-indicator">
                {move || {
                    let c = cursor();
                    format!("Page {} of {}", c.page, c.total_pages)
                }}
            </span>
            <button
                disabled=move || !cursor().has_next() || snapshot.with(|s| s.loading)
                on:click=move |_| go_to(cursor().page + 1)
            >
                "Next"
            </button>
        </div>
    }
}
