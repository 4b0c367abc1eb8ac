//! Bottom Navigation

use leptos::prelude::*;

/// Main screens reachable from the bottom bar
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Gallery,
    Offers,
    Profile,
    Settings,
}

const TABS: [(Tab, &str, &str); 4] = [
    (Tab::Gallery, "🖼", "Gallery"),
    (Tab::Offers, "🏷", "Offers"),
    (Tab::Profile, "👤", "Profile"),
    (Tab::Settings, "⚙", "Settings"),
];

#[component]
pub fn BottomNav(
    current: ReadSignal<Tab>,
    #[prop(into)] on_select: Callback<Tab>,
) -> impl IntoView {
    view! {
        <nav class="mobile-bottom-nav">
            {TABS.iter().map(|(tab, icon, label)| {
                let tab = *tab;
                view! {
                    <button
                        class=move || if current.get() == tab { "mobile-nav-item active" } else { "mobile-nav-item" }
                        on:click=move |_| on_select.run(tab)
                    >
                        <div class="mobile-nav-icon">{*icon}</div>
                        <div class="mobile-nav-label">{*label}</div>
                    </button>
                }
            }).collect_view()}
        </nav>
    }
}
