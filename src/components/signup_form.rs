//! Signup Form Component

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::models::SignupRequest;
use crate::store::{store_set_session, use_app_store};

#[component]
pub fn SignupForm(
    /// Back to the login screen
    on_login: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let request = RwSignal::new(SignupRequest::default());
    let (pending, set_pending) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if pending.get_untracked() {
            return;
        }
        let request = request.get();
        set_pending.set(true);
        spawn_local(async move {
            match commands::signup(&request).await {
                Ok(session) => {
                    store_set_session(&store, session);
                    ctx.success("Account created");
                }
                Err(e) => ctx.error(e),
            }
            set_pending.try_set(false);
        });
    };

    view! {
        <form class="auth-form" on:submit=submit>
            <h1>"Create Account"</h1>
            <input
                type="text"
                placeholder="Full Name"
                prop:value=move || request.with(|r| r.name.clone())
                on:input=move |ev| request.update(|r| r.name = event_target_value(&ev))
            />
            <input
                type="email"
                placeholder="Email"
                prop:value=move || request.with(|r| r.email.clone())
                on:input=move |ev| request.update(|r| r.email = event_target_value(&ev))
            />
            <input
                type="tel"
                placeholder="Phone"
                prop:value=move || request.with(|r| r.phone.clone())
                on:input=move |ev| request.update(|r| r.phone = event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Password"
                prop:value=move || request.with(|r| r.password.clone())
                on:input=move |ev| request.update(|r| r.password = event_target_value(&ev))
            />
            <input
                type="password"
                placeholder="Confirm Password"
                prop:value=move || request.with(|r| r.confirm_password.clone())
                on:input=move |ev| request.update(|r| r.confirm_password = event_target_value(&ev))
            />
            <button type="submit" class="primary-btn" disabled=move || pending.get()>
                {move || if pending.get() { "Creating..." } else { "Sign Up" }}
            </button>
            <p class="auth-switch">
                "Already have an account? "
                <a href="#" on:click=move |ev| {
                    ev.prevent_default();
                    on_login.run(());
                }>"Login"</a>
            </p>
        </form>
    }
}
