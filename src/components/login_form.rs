//! Login Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::store::{store_set_session, use_app_store};

#[component]
pub fn LoginForm(
    /// Switch to the signup screen
    on_signup: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let email = email.get();
        let password = password.get();
        set_pending.set(true);
        spawn_local(async move {
            match commands::login(&email, &password).await {
                Ok(session) => {
                    let name = session.user.as_ref().map(|u| u.name.clone()).unwrap_or_default();
                    store_set_session(&store, session);
                    ctx.success(format!("Welcome back, {}", name));
                }
                Err(e) => ctx.error(e),
            }
            set_pending.try_set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            <h1>"Welcome Back"</h1>
            <input
                type="email"
                placeholder="Email"
                autocomplete="email"
                prop:value=move || email.get()
                on:input=move |ev| set_email.set(event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                autocomplete="current-password"
                prop:value=move || password.get()
                on:input=move |ev| set_password.set(event_target_value(&ev))
            />
            <button type="submit" class="primary-btn" disabled=move || pending.get()>
                {move || if pending.get() { "Signing in..." } else { "Login" }}
            </button>
            <p class="auth-switch">
                "Don't have an account? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    on_signup.run(());
                }>"Sign Up"</a>
            </p>
        </form>
    }
}
