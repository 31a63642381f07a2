//! トップページ

use leptos::prelude::*;
use heartnotes_common::ContentType;
use crate::app::Route;

fn section_label(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Feelings => "How are you feeling?",
        ContentType::Letters => "Letters to You",
        ContentType::Memories => "Our Memories",
    }
}

#[component]
pub fn Home(set_route: WriteSignal<Route>) -> impl IntoView {
    view! {
        <section class="home">
            <h1>"For You"</h1>
            <nav class="home-links">
                {ContentType::ALL
                    .into_iter()
                    .map(|content_type| view! {
                        <button
                            class="home-card"
                            on:click=move |_| set_route.set(Route::Gallery(content_type))
                        >
                            {section_label(content_type)}
                        </button>
                    })
                    .collect_view()}
            </nav>
        </section>
    }
}
