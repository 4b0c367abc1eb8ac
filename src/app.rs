//! Wayfarer Frontend App
//!
//! Auth screens until a user is stored, then the tabbed main shell.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{
    BottomNav, GalleryScreen, LoginForm, OfferBoard, ProfileCard, SettingsPanel, SignupForm, Tab, Toast,
};
use crate::context::AppContext;
use crate::store::{store_set_session, AppState, AppStateStoreFields};

#[derive(Clone, Copy, PartialEq)]
enum AuthScreen {
    Login,
    Signup,
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(signal(None));
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Load the stored session once
    Effect::new(move |_| {
        spawn_local(async move {
            match commands::load_session().await {
                Ok(session) => store_set_session(&store, session),
                Err(e) => {
                    store.session_loaded().set(true);
                    ctx.error(e);
                }
            }
        });
    });

    let signed_in = Memo::new(move |_| store.user().with(|user| user.is_some()));

    view! {
        <div class="app-layout">
            {move || {
                if !store.session_loaded().get() {
                    view! { <div class="splash">"Wayfarer"</div> }.into_any()
                } else if signed_in.get() {
                    view! { <MainShell /> }.into_any()
                } else {
                    view! { <AuthScreens /> }.into_any()
                }
            }}
            <Toast />
        </div>
    }
}

#[component]
fn AuthScreens() -> impl IntoView {
    let (screen, set_screen) = signal(AuthScreen::Login);

    view! {
        <div class="auth-screen">
            {move || match screen.get() {
                AuthScreen::Login => view! {
                    <LoginForm on_signup=Callback::new(move |_: ()| set_screen.set(AuthScreen::Signup)) />
                }.into_any(),
                AuthScreen::Signup => view! {
                    <SignupForm on_login=Callback::new(move |_: ()| set_screen.set(AuthScreen::Login)) />
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn MainShell() -> impl IntoView {
    let (tab, set_tab) = signal(Tab::Gallery);

    view! {
        <main class="main-content">
            // Each screen mounts its own list handle
            {move || match tab.get() {
                Tab::Gallery => view! { <GalleryScreen /> }.into_any(),
                Tab::Offers => view! { <OfferBoard /> }.into_any(),
                Tab::Profile => view! { <ProfileCard /> }.into_any(),
                Tab::Settings => view! { <SettingsPanel /> }.into_any(),
            }}
        </main>
        <BottomNav current=tab on_select=Callback::new(move |next: Tab| set_tab.set(next)) />
    }
}
