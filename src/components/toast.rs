//! Toast Component
//!
//! Single notification surface for success and error messages.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::context::{use_app_context, ToastKind};

const TOAST_MILLIS: u32 = 3000;

#[component]
pub fn Toast() -> impl IntoView {
    let ctx = use_app_context();

    // Auto-dismiss each new message
    Effect::new(move |_| {
        if let Some(message) = ctx.toast.get() {
            let id = message.id;
            spawn_local(async move {
                TimeoutFuture::new(TOAST_MILLIS).await;
                ctx.dismiss(id);
            });
        }
    });

    view! {
        {move || ctx.toast.get().map(|message| {
            let class = match message.kind {
                ToastKind::Success => "toast toast-success",
                ToastKind::Error => "toast toast-error",
            };
            let id = message.id;
            view! {
                <div class=class role="alert" on:click=move |_| ctx.dismiss(id)>
                    {message.text}
                </div>
            }
        })}
    }
}
