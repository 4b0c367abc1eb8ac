//! Gallery Screen Component
//!
//! Two-column photo grid over the gallery list, with detail and upload
//! sub-views.

use leptos::prelude::*;

use crate::binding::ListBinding;
use crate::components::{DeleteConfirmButton, ImageDetail, UploadForm};
use crate::models::{ItemCard, ListKind};

#[derive(Clone, PartialEq)]
enum GalleryMode {
    Grid,
    Detail(String),
    Upload,
}

#[component]
pub fn GalleryScreen() -> impl IntoView {
    let list = ListBinding::mount(ListKind::Gallery);
    let (mode, set_mode) = signal(GalleryMode::Grid);
    let back = Callback::new(move |_: ()| set_mode.set(GalleryMode::Grid));

    view! {
        <div class="gallery-screen">
            {move || match mode.get() {
                GalleryMode::Grid => view! {
                    <GalleryGrid
                        list=list
                        on_open=Callback::new(move |id: String| set_mode.set(GalleryMode::Detail(id)))
                        on_add=Callback::new(move |_: ()| set_mode.set(GalleryMode::Upload))
                    />
                }.into_any(),
                GalleryMode::Detail(id) => view! {
                    <ImageDetail list=list id=id on_back=back />
                }.into_any(),
                GalleryMode::Upload => view! {
                    <UploadForm list=list on_done=back />
                }.into_any(),
            }}
        </div>
    }
}

#[component]
fn GalleryGrid(
    list: ListBinding,
    on_open: Callback<String>,
    on_add: Callback<()>,
) -> impl IntoView {
    let is_empty = move || list.view.with(|view| view.as_ref().map_or(true, |v| v.items.is_empty()));

    view! {
        <div class="gallery-header">
            <h1>"Gallery"</h1>
            <button class="refresh-btn" title="Refresh" on:click=move |_| list.refresh()>"⟳"</button>
        </div>

        <Show when=move || is_empty() && list.busy.get()>
            <p class="list-status">"Loading..."</p>
        </Show>
        <Show when=move || is_empty() && !list.busy.get()>
            <p class="list-status">"No photos yet. Tap + to add one."</p>
        </Show>

        <div class="gallery-grid">
            <For
                each=move || list.items()
                key=|item| item.id.clone()
                children=move |item: ItemCard| {
                    let open_id = item.id.clone();
                    let delete_id = item.id.clone();
                    let name = item.attr("name");
                    view! {
                        <div class="gallery-card" on:click=move |_| on_open.run(open_id.clone())>
                            <img class="gallery-card-image" src=item.media_url.clone() alt=name.clone() loading="lazy" />
                            <div class="gallery-card-footer">
                                <span class="gallery-card-title">{name}</span>
                                <DeleteConfirmButton
                                    button_class="delete-btn"
                                    on_confirm=Callback::new(move |_| list.remove(delete_id.clone(), || {}))
                                />
                            </div>
                        </div>
                    }
                }
            />
        </div>

        <Show when=move || list.has_more()>
            <button
                class="see-more-btn"
                disabled=move || list.busy.get()
                on:click=move |_| list.load_more()
            >
                {move || if list.busy.get() { "Loading..." } else { "See More" }}
            </button>
        </Show>

        <button class="fab" title="Upload photo" on:click=move |_| on_add.run(())>"+"</button>
    }
}
