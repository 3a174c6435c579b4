//! Notice Banner Component
//!
//! Dismissible message for the outcome of the last intent.

use leptos::prelude::*;

use crate::context::{AppContext, NoticeKind};

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    move || {
        ctx.notice.get().map(|notice| {
            let class = match notice.kind {
                NoticeKind::Error => "notice notice-error",
                NoticeKind::Success => "notice notice-success",
            };
            view! {
                <div class=class role="alert">
                    <span class="notice-text">{notice.text}</span>
                    <button class="notice-close" on:click=move |_| ctx.dismiss_notice()>"×"</button>
                </div>
            }
        })
    }
}
