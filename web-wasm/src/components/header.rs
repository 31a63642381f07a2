//! ヘッダーコンポーネント

use leptos::prelude::*;
use heartnotes_common::DisplayPreferences;
use crate::app::Route;
use crate::storage::LocalStore;

#[component]
pub fn Header(
    prefs: ReadSignal<DisplayPreferences>,
    set_prefs: WriteSignal<DisplayPreferences>,
    set_route: WriteSignal<Route>,
) -> impl IntoView {
    let on_toggle = move |_| {
        set_prefs.update(|p| {
            p.toggle_mode(&mut LocalStore);
        });
    };

    view! {
        <header class="header">
            <button class="home-link" on:click=move |_| set_route.set(Route::Home)>
                {move || format!("heartnotes {}", prefs.get().heart)}
            </button>
            <button
                class="theme-toggle"
                aria-label="Toggle dark mode"
                on:click=on_toggle
            >
                {move || if prefs.get().is_dark() { "☀️" } else { "🌙" }}
            </button>
        </header>
    }
}
