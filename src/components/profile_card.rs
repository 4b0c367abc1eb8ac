//! Profile Card Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{store_set_session, use_app_store, AppStateStoreFields};

/// Local date of a unix-millis timestamp
fn format_signed_in(millis: i64) -> String {
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(millis as f64));
    String::from(date.to_locale_date_string("default", &wasm_bindgen::JsValue::UNDEFINED))
}

#[component]
pub fn ProfileCard() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let logout = move |_| {
        spawn_local(async move {
            match commands::logout().await {
                Ok(session) => {
                    store_set_session(&store, session);
                    ctx.success("Signed out");
                }
                Err(e) => ctx.error(e),
            }
        });
    };

    view! {
        <div class="profile-card">
            {move || store.user().get().map(|user| {
                let initial = user.name.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
                view! {
                    <div class="profile-avatar">{initial}</div>
                    <h2 class="profile-name">{user.name.clone()}</h2>
                    {user.email.clone().map(|email| view! { <p class="profile-email">{email}</p> })}
                    {user.signed_in_at.map(|at| view! {
                        <p class="profile-since">"Signed in " {format_signed_in(at)}</p>
                    })}
                }
            })}
            <div class="profile-preferences">
                <span>{move || store.preferences().get().language}</span>
                <span>{move || store.preferences().get().currency}</span>
                <span>{move || store.preferences().get().region.unwrap_or_else(|| "No region".to_string())}</span>
            </div>
            <button class="logout-btn" on:click=logout>"Logout"</button>
        </div>
    }
}
