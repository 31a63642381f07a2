//! 一覧（カードギャラリー）
//!
//! index.json を読み、各アイテムの config から配色を補う。
//! config の取得に失敗したアイテムは一覧側の配色（無ければ既定色）で表示する。

use leptos::prelude::*;
use leptos::task::spawn_local;
use heartnotes_common::{
    ColorRole, ContentLoader, ContentType, DisplayPreferences, GroupEntry, IndexEntry, IndexManifest,
    RequestTracker, Theming,
};
use std::collections::BTreeMap;
use wasm_bindgen::JsValue;
use crate::api::FetchSource;
use crate::app::{LoadState, Route};
use crate::components::detail::css_name;

/// カード1枚分
#[derive(Clone, Debug, PartialEq)]
pub struct CardItem {
    pub entry: IndexEntry,
    pub theming: Option<Theming>,
}

/// 表示用に組み立てた一覧
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryData {
    pub sections: Vec<(Option<GroupEntry>, Vec<CardItem>)>,
}

impl GalleryData {
    /// グループがあればグループ別、無ければひとつのセクション
    fn build(manifest: &IndexManifest, themings: &BTreeMap<String, Theming>) -> Self {
        let card = |entry: &IndexEntry| CardItem {
            theming: themings.get(&entry.id).cloned().or_else(|| entry.theming.clone()),
            entry: entry.clone(),
        };

        let sections = if manifest.groups.is_empty() {
            vec![(None, manifest.items.iter().map(card).collect())]
        } else {
            manifest
                .grouped()
                .into_iter()
                .map(|(group, items)| (Some(group.clone()), items.into_iter().map(card).collect()))
                .collect()
        };
        Self { sections }
    }

    fn is_empty(&self) -> bool {
        self.sections.iter().all(|(_, cards)| cards.is_empty())
    }
}

fn heading(content_type: ContentType) -> (&'static str, &'static str) {
    match content_type {
        ContentType::Feelings => (
            "How are you feeling?",
            "Tap on how you're feeling right now, and I'll be there for you",
        ),
        ContentType::Letters => ("Letters to You", "Words from my heart to yours"),
        ContentType::Memories => ("Our Memories", "Moments I keep close"),
    }
}

fn empty_message(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Feelings => "Feelings coming soon...",
        ContentType::Letters => "Letters coming soon...",
        ContentType::Memories => "Memories coming soon...",
    }
}

async fn load_gallery(content_type: ContentType) -> Result<GalleryData, String> {
    let loader = ContentLoader::new(FetchSource::default());
    let manifest = loader
        .fetch_index_with_groups(content_type)
        .await
        .map_err(|e| e.to_string())?;

    let configs = loader
        .fetch_all_configs(content_type, manifest.items.iter().map(|entry| entry.id.as_str()))
        .await;
    let themings = configs
        .into_iter()
        .filter_map(|(id, config)| config.theming.map(|theming| (id, theming)))
        .collect();

    Ok(GalleryData::build(&manifest, &themings))
}

#[component]
pub fn Gallery(
    content_type: ContentType,
    prefs: ReadSignal<DisplayPreferences>,
    set_route: WriteSignal<Route>,
    tracker: RequestTracker,
) -> impl IntoView {
    let (state, set_state) = signal(LoadState::<GalleryData>::Loading);

    let ticket = tracker.begin();
    spawn_local(async move {
        let result = load_gallery(content_type).await;
        if !tracker.is_current(ticket) {
            return;
        }
        match result {
            Ok(data) => set_state.set(LoadState::Ready(data)),
            Err(e) => {
                web_sys::console::error_1(&JsValue::from_str(&format!("Failed to load {}: {}", content_type, e)));
                set_state.set(LoadState::Failed(format!("Could not load {}. Please try again.", content_type)));
            }
        }
    });

    let (title, subtitle) = heading(content_type);

    view! {
        <section class="gallery">
            <h1 class="gallery-title">{title}</h1>
            <p class="gallery-subtitle">{subtitle}</p>

            {move || match state.get() {
                LoadState::Loading => view! {
                    <div class="loading-container"><p>"Loading..."</p></div>
                }.into_any(),
                LoadState::Failed(message) => view! {
                    <div class="error-container"><p>{message}</p></div>
                }.into_any(),
                LoadState::Ready(data) if data.is_empty() => view! {
                    <p class="gallery-empty">{empty_message(content_type)}</p>
                }.into_any(),
                LoadState::Ready(data) => data
                    .sections
                    .into_iter()
                    .map(|(group, cards)| view! {
                        <GallerySection
                            content_type=content_type
                            group=group
                            cards=cards
                            prefs=prefs
                            set_route=set_route
                        />
                    })
                    .collect_view()
                    .into_any(),
            }}
        </section>
    }
}

#[component]
fn GallerySection(
    content_type: ContentType,
    group: Option<GroupEntry>,
    cards: Vec<CardItem>,
    prefs: ReadSignal<DisplayPreferences>,
    set_route: WriteSignal<Route>,
) -> impl IntoView {
    let header = group.map(|group| view! {
        <header class="gallery-group">
            <h2>{group.title}</h2>
            {group.description.map(|d| view! { <p>{d}</p> })}
        </header>
    });

    view! {
        <div class="gallery-section">
            {header}
            <div class="gallery-grid">
                {cards
                    .into_iter()
                    .enumerate()
                    .map(|(index, card)| view! {
                        <Card content_type=content_type card=card delay=index prefs=prefs set_route=set_route />
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

/// カードのCSS変数（表示モードに応じた配色）
fn card_style(theming: Option<&Theming>, prefs: &DisplayPreferences, delay: usize) -> String {
    let mut style = format!("animation-delay: {}ms;", delay * 60);
    if let Some(theming) = theming.map(|t| t.for_mode(prefs.mode)) {
        for role in ColorRole::ALL {
            let color = theming.color(role);
            if !color.is_empty() {
                style.push_str(&format!(" --card-{}: {};", css_name(role), color));
            }
        }
    }
    style
}

#[component]
fn Card(
    content_type: ContentType,
    card: CardItem,
    delay: usize,
    prefs: ReadSignal<DisplayPreferences>,
    set_route: WriteSignal<Route>,
) -> impl IntoView {
    let CardItem { entry, theming } = card;
    let id = entry.id.clone();
    let subtitle = entry.subtitle.clone().or(entry.date.clone());
    let title = if entry.title.is_empty() { entry.id.clone() } else { entry.title.clone() };

    view! {
        <button
            class="card"
            style=move || card_style(theming.as_ref(), &prefs.get(), delay)
            on:click=move |_| set_route.set(Route::Detail(content_type, id.clone()))
        >
            <h3 class="card-title">{title}</h3>
            {subtitle.map(|s| view! { <p class="card-subtitle">{s}</p> })}
        </button>
    }
}
