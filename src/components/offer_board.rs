//! Offer Board Component
//!
//! Offers grouped by offer type. Each group expands to show its cards; the
//! add form uploads a new offer image into the chosen group.

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::binding::ListBinding;
use crate::commands;
use crate::components::upload_form::file_label;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::{ItemCard, ListKind, OFFER_TYPES};

/// Cards bucketed by offer type, in the fixed type order
pub fn group_offers(items: &[ItemCard]) -> Vec<(&'static str, Vec<ItemCard>)> {
    OFFER_TYPES
        .iter()
        .map(|offer_type| {
            let cards = items
                .iter()
                .filter(|item| item.attr("offerType") == *offer_type)
                .cloned()
                .collect();
            (*offer_type, cards)
        })
        .collect()
}

#[component]
pub fn OfferBoard() -> impl IntoView {
    let list = ListBinding::mount(ListKind::Offers);
    let expanded = RwSignal::new(None::<&'static str>);
    let (adding, set_adding) = signal(false);

    let groups = move || list.view.with(|view| {
        view.as_ref().map(|v| group_offers(&v.items)).unwrap_or_else(|| group_offers(&[]))
    });

    view! {
        <div class="offer-board">
            <div class="gallery-header">
                <h1>"Offers"</h1>
                <button class="refresh-btn" title="Refresh" on:click=move |_| list.refresh()>"⟳"</button>
            </div>

            <Show when=move || adding.get()>
                <OfferForm list=list on_done=Callback::new(move |_: ()| set_adding.set(false)) />
            </Show>

            <For
                each=groups
                key=|(offer_type, cards)| {
                    let ids: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();
                    (*offer_type, ids)
                }
                children=move |(offer_type, cards)| {
                    let count = cards.len();
                    let is_open = move || expanded.get() == Some(offer_type);
                    view! {
                        <section class="offer-group">
                            <button
                                class="offer-group-header"
                                on:click=move |_| expanded.update(|open| {
                                    *open = if *open == Some(offer_type) { None } else { Some(offer_type) };
                                })
                            >
                                <span class="offer-group-title">{offer_type}</span>
                                <span class="offer-group-count">{count}</span>
                                <span class="offer-group-arrow">{move || if is_open() { "▾" } else { "▸" }}</span>
                            </button>
                            <Show when=is_open>
                                <div class="offer-cards">
                                    {cards.clone().into_iter().map(|card| view! { <OfferCard list=list card=card /> }).collect_view()}
                                    {(count == 0).then(|| view! { <p class="list-status">"No offers yet."</p> })}
                                </div>
                            </Show>
                        </section>
                    }
                }
            />

            <Show when=move || list.has_more()>
                <button
                    class="see-more-btn"
                    disabled=move || list.busy.get()
                    on:click=move |_| list.load_more()
                >
                    {move || if list.busy.get() { "Loading..." } else { "See More" }}
                </button>
            </Show>

            <Show when=move || !adding.get()>
                <button class="fab" title="Add offer" on:click=move |_| set_adding.set(true)>"+"</button>
            </Show>
        </div>
    }
}

#[component]
fn OfferCard(list: ListBinding, card: ItemCard) -> impl IntoView {
    let id = card.id.clone();
    view! {
        <div class="offer-card">
            <img class="offer-card-image" src=card.media_url.clone() alt=card.attr("offerType") loading="lazy" />
            <p class="offer-card-description">{card.attr("description")}</p>
            <DeleteConfirmButton
                button_class="delete-btn"
                on_confirm=Callback::new(move |_| list.remove(id.clone(), || {}))
            />
        </div>
    }
}

#[component]
fn OfferForm(list: ListBinding, on_done: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let (path, set_path) = signal(None::<String>);
    let (offer_type, set_offer_type) = signal(OFFER_TYPES[0].to_string());
    let (description, set_description) = signal(String::new());

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
        let description = description.get().trim().to_string();
        if description.is_empty() {
            ctx.error("Please fill all fields");
            return;
        }
        let mut fields = BTreeMap::new();
        fields.insert("offerType".to_string(), offer_type.get());
        fields.insert("description".to_string(), description);
        list.upload(picked, fields, move || on_done.run(()));
    };

    view! {
        <form class="offer-form" on:submit=submit>
            <select
                prop:value=move || offer_type.get()
                on:change=move |ev| set_offer_type.set(event_target_value(&ev))
            >
                {OFFER_TYPES.iter().map(|t| view! { <option value=*t>{*t}</option> }).collect_view()}
            </select>
            <textarea
                placeholder="Description"
                prop:value=move || description.get()
                on:input=move |ev| set_description.set(event_target_value(&ev))
            />
            <button type="button" class="pick-btn" on:click=pick>
                {move || path.get().map(|p| file_label(&p)).unwrap_or_else(|| "Choose Image".to_string())}
            </button>
            <div class="offer-form-actions">
                <button type="button" class="secondary-btn" on:click=move |_| on_done.run(())>"Cancel"</button>
                <button type="submit" class="primary-btn" disabled=move || list.busy.get()>
                    {move || if list.busy.get() { "Uploading..." } else { "Add Offer" }}
                </button>
            </div>
        </form>
    }
}
