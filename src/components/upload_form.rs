//! Upload Form Component
//!
//! Pick a photo with the native dialog and describe it.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::binding::ListBinding;
use crate::commands;
use crate::context::use_app_context;

/// Last path segment, for showing which file was picked
pub fn file_label(path: &str) -> String {
    path.rsplit(['/', '\\']).next().unwrap_or(path).to_string()
}

#[component]
pub fn UploadForm(
    list: ListBinding,
    on_done: Callback<()>,
) -> impl IntoView {
    let ctx = use_app_context();

    let (path, set_path) = signal(None::<String>);
    let (name, set_name) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (location, set_location) = signal(String::new());

    let pick = move |_| {
        spawn_local(async move {
            match commands::pick_image().await {
                Ok(Some(picked)) => {
                    set_path.try_set(Some(picked));
                }
                Ok(None) => {}
                Err(e) => ctx.error(e),
            }
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(picked) = path.get() else {
            ctx.error("Please select an image");
            return;
        };
        let fields: BTreeMap<String, String> = [
            ("name", name.get()),
            ("description", description.get()),
            ("location", location.get()),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value.trim().to_string()))
        .collect();
        if fields.values().any(|value| value.is_empty()) {
            ctx.error("Please fill all fields");
            return;
        }
        list.upload(picked, fields, move || on_done.run(()));
    };

    view! {
        <form class="upload-form" on:submit=submit>
            <div class="upload-form-header">
                <button type="button" class="back-btn" on:click=move |_| on_done.run(())>"← Back"</button>
                <h2>"Upload Photo"</h2>
            </div>

            <button type="button" class="pick-btn" on:click=pick>
                {move || path.get().map(|p| file_label(&p)).unwrap_or_else(|| "Choose Image".to_string())}
            </button>

            <input
                type="text"
                placeholder="Name"
                prop:value=move || name.get()
                on:input=move |ev| set_name.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Location"
                prop:value=move || location.get()
                on:input=move |ev| set_location.set(event_target_value(&ev))
            />

            <button type="submit" class="primary-btn" disabled=move || list.busy.get()>
                {move || if list.busy.get() { "Uploading..." } else { "Upload" }}
            </button>
        </form>
    }
}
