//! Status Banner Component
//!
//! Shows the manager's notice. Info notices dismiss themselves after a few
//! seconds; errors stay until closed.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use record_manager::{ManagerSnapshot, NoticeKind};

use crate::context::{with_manager, ManagerHandle};

const INFO_DISMISS_MS: u32 = 3_000;

#[component]
pub fn StatusBanner(snapshot: RwSignal<ManagerSnapshot>, manager: ManagerHandle) -> impl IntoView {
    let notice = Memo::new(move |_| snapshot.with(|s| s.notice.clone()));

    Effect::new(move |_| {
        let Some(current) = notice.get() else { return };
        if current.kind != NoticeKind::Info {
            return;
        }
        spawn_local(async move {
            TimeoutFuture::new(INFO_DISMISS_MS).await;
            // a newer notice replaced this one in the meantime
            if notice.try_get_untracked().flatten().as_ref() == Some(&current) {
                with_manager(manager, |m| m.dismiss_notice());
            }
        });
    });

    view! {
        {move || {
            notice
                .get()
                .map(|n| {
                    let class = match n.kind {
                        NoticeKind::Info => "status-banner info",
                        NoticeKind::Error => "status-banner error",
                    };
                    view! {
                        <div class=class role="status">
                            <span>{n.message}</span>
                            <button class="cancel-btn" on:click=move |_| with_manager(manager, |m| m.dismiss_notice())>
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
        <Show when=move || snapshot.with(|s| s.loading)>
            <div class="loading-indicator">"Loading..."</div>
        </Show>
    }
}
