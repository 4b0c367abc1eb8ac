//! Settings Panel Component
//!
//! Display preferences, server address and the most recent log lines.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::use_app_context;
use crate::models::{AppConfig, Preferences, CURRENCIES, LANGUAGES, REGIONS};
use crate::store::{store_set_session, use_app_store, AppStateStoreFields};

const LOG_LINES: usize = 200;

#[component]
pub fn SettingsPanel() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Config is fetched once and cached in the store
    Effect::new(move |_| {
        if store.config().get_untracked().is_none() {
            spawn_local(async move {
                match commands::get_config().await {
                    Ok(config) => store.config().set(Some(config)),
                    Err(e) => ctx.error(e),
                }
            });
        }
    });

    let update_preferences = move |change: Box<dyn FnOnce(&mut Preferences)>| {
        let mut preferences = store.preferences().get_untracked();
        change(&mut preferences);
        spawn_local(async move {
            match commands::save_preferences(&preferences).await {
                Ok(session) => store_set_session(&store, session),
                Err(e) => ctx.error(e),
            }
        });
    };

    view! {
        <div class="settings-panel">
            <h1>"Settings"</h1>

            <section class="settings-section">
                <h2>"Preferences"</h2>
                <label>
                    "Language"
                    <select
                        prop:value=move || store.preferences().get().language
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            update_preferences(Box::new(move |p| p.language = value));
                        }
                    >
                        {LANGUAGES.iter().map(|l| view! { <option value=*l>{*l}</option> }).collect_view()}
                    </select>
                </label>
                <label>
                    "Region"
                    <select
                        prop:value=move || store.preferences().get().region.unwrap_or_default()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            update_preferences(Box::new(move |p| {
                                p.region = (!value.is_empty()).then_some(value);
                            }));
                        }
                    >
                        <option value="">"Select region"</option>
                        {REGIONS.iter().map(|r| view! { <option value=*r>{*r}</option> }).collect_view()}
                    </select>
                </label>
                <label>
                    "Currency"
                    <select
                        prop:value=move || store.preferences().get().currency
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            update_preferences(Box::new(move |p| p.currency = value));
                        }
                    >
                        {CURRENCIES.iter().map(|c| view! { <option value=*c>{*c}</option> }).collect_view()}
                    </select>
                </label>
            </section>

            {move || store.config().get().map(|config| view! { <ServerSettings config=config /> })}

            <RecentLogs />
        </div>
    }
}

#[component]
fn ServerSettings(config: AppConfig) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (server_url, set_server_url) = signal(config.server_url.clone());
    let (page_size, set_page_size) = signal(config.page_size.to_string());

    let save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Ok(page_size) = page_size.get().trim().parse::<u32>() else {
            ctx.error("Page size must be a number");
            return;
        };
        let updated = AppConfig {
            server_url: server_url.get().trim().to_string(),
            page_size,
            request_timeout_secs: config.request_timeout_secs,
        };
        spawn_local(async move {
            match commands::save_config(&updated).await {
                Ok(saved) => {
                    store.config().set(Some(saved));
                    ctx.success("Server settings saved");
                }
                Err(e) => ctx.error(e),
            }
        });
    };

    view! {
        <form class="settings-section" on:submit=save>
            <h2>"Server"</h2>
            <label>
                "Address"
                <input
                    type="url"
                    prop:value=move || server_url.get()
                    on:input=move |ev| set_server_url.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Page size"
                <input
                    type="number"
                    min="1"
                    max="100"
                    prop:value=move || page_size.get()
                    on:input=move |ev| set_page_size.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" class="primary-btn">"Save"</button>
        </form>
    }
}

#[component]
fn RecentLogs() -> impl IntoView {
    let ctx = use_app_context();
    let lines = RwSignal::new(Vec::<String>::new());

    let reload = move || {
        spawn_local(async move {
            match commands::recent_logs(Some(LOG_LINES)).await {
                Ok(recent) => {
                    lines.try_set(recent);
                }
                Err(e) => ctx.error(e),
            }
        });
    };
    reload();

    view! {
        <section class="settings-section">
            <div class="settings-section-header">
                <h2>"Recent Logs"</h2>
                <button class="refresh-btn" title="Reload" on:click=move |_| reload()>"⟳"</button>
            </div>
            <pre class="log-view">
                {move || lines.get().join("\n")}
            </pre>
        </section>
    }
}
