//! Image Detail Component

use leptos::prelude::*;

use crate::binding::ListBinding;
use crate::components::DeleteConfirmButton;
use crate::models::ItemCard;

#[component]
pub fn ImageDetail(
    list: ListBinding,
    id: String,
    on_back: Callback<()>,
) -> impl IntoView {
    // None = still looking, Some(None) = gone from the list
    let item = RwSignal::new(None::<Option<ItemCard>>);
    list.find(id.clone(), move |found| {
        item.try_set(Some(found));
    });

    view! {
        <div class="image-detail">
            <button class="back-btn" on:click=move |_| on_back.run(())>"← Back"</button>
            {move || match item.get() {
                None => view! { <p class="list-status">"Loading..."</p> }.into_any(),
                Some(None) => view! { <p class="list-status">"This photo is no longer available."</p> }.into_any(),
                Some(Some(card)) => {
                    let delete_id = card.id.clone();
                    view! {
                        <img class="image-detail-photo" src=card.media_url.clone() alt=card.attr("name") />
                        <div class="image-detail-info">
                            <h2>{card.attr("name")}</h2>
                            <p class="image-detail-location">"📍 " {card.attr("location")}</p>
                            <p class="image-detail-description">{card.attr("description")}</p>
                        </div>
                        <DeleteConfirmButton
                            button_class="delete-btn large"
                            on_confirm=Callback::new(move |_| list.remove(delete_id.clone(), move || on_back.run(())))
                        />
                    }.into_any()
                }
            }}
        </div>
    }
}
