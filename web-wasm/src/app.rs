//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use gloo::events::EventListener;
use heartnotes_common::{
    ContentType, DisplayMode, DisplayPreferences, RequestTracker, HEART_EMOJIS,
};
use crate::components::{
    detail::Detail,
    gallery::Gallery,
    header::Header,
    home::Home,
};
use crate::storage::LocalStore;

const DARK_MEDIA_QUERY: &str = "(prefers-color-scheme: dark)";

/// 表示中の画面
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Home,
    Gallery(ContentType),
    Detail(ContentType, String),
}

/// 非同期読み込みの状態
#[derive(Clone, Debug)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

fn system_prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media(DARK_MEDIA_QUERY).ok().flatten())
        .map(|mql| mql.matches())
        .unwrap_or(false)
}

/// `<html data-theme="...">` に反映
fn apply_document_theme(mode: DisplayMode) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-theme", mode.as_str());
    }
}

/// システム設定の変化を購読（ユーザーが選んでいない場合のみ追従）
fn watch_system_theme(set_prefs: WriteSignal<DisplayPreferences>) {
    let Some(mql) = web_sys::window().and_then(|w| w.match_media(DARK_MEDIA_QUERY).ok().flatten()) else {
        return;
    };
    let target = mql.clone();
    EventListener::new(&target, "change", move |_| {
        let dark = mql.matches();
        set_prefs.update(|prefs| {
            prefs.follow_system(&LocalStore, dark);
        });
    })
    .forget();
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // 表示設定はここで一度だけ組み立てて下へ渡す
    let heart_index = (js_sys::Math::random() * HEART_EMOJIS.len() as f64) as usize;
    let initial = DisplayPreferences::load(&LocalStore, system_prefers_dark(), heart_index);
    let (prefs, set_prefs) = signal(initial);
    let (route, set_route) = signal(Route::Home);

    // 画面をまたいだ古いレスポンスを捨てる
    let tracker = RequestTracker::new();

    Effect::new(move |_| apply_document_theme(prefs.get().mode));
    watch_system_theme(set_prefs);

    view! {
        <div class="app">
            <Header prefs=prefs set_prefs=set_prefs set_route=set_route />

            <main class="page">
                {move || {
                    let tracker = tracker.clone();
                    match route.get() {
                        Route::Home => view! { <Home set_route=set_route /> }.into_any(),
                        Route::Gallery(content_type) => view! {
                            <Gallery
                                content_type=content_type
                                prefs=prefs
                                set_route=set_route
                                tracker=tracker
                            />
                        }.into_any(),
                        Route::Detail(content_type, id) => view! {
                            <Detail
                                content_type=content_type
                                id=id
                                prefs=prefs
                                set_prefs=set_prefs
                                set_route=set_route
                                tracker=tracker
                            />
                        }.into_any(),
                    }
                }}
            </main>
        </div>
    }
}
