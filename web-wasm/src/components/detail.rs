//! 詳細ページ
//!
//! config と参照されたMarkdownを読み込み、表示モードに応じた配色で表示する。
//! feelings は一覧側のタイトルを使う（letters / memories は config のタイトル）。

use leptos::prelude::*;
use leptos::task::spawn_local;
use heartnotes_common::{
    link_citations, with_version, BibleVersion, BodyField, ColorRole, ContentLoader, ContentRecord,
    ContentType, DisplayPreferences, RequestTracker, Theming,
};
use wasm_bindgen::JsValue;
use crate::api::FetchSource;
use crate::app::{LoadState, Route};
use crate::components::markdown::Markdown;
use crate::storage::LocalStore;

async fn load_record(content_type: ContentType, id: &str) -> Result<ContentRecord, String> {
    let loader = ContentLoader::new(FetchSource::default());

    let record = if content_type == ContentType::Feelings {
        let (index, record) = futures::join!(
            loader.fetch_index(content_type),
            loader.load_content(content_type, id)
        );
        record.and_then(|record| index.map(|index| record.with_index_title(&index)))
    } else {
        loader.load_content(content_type, id).await
    };
    record.map_err(|e| e.to_string())
}

fn singular(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Feelings => "feeling",
        ContentType::Letters => "letter",
        ContentType::Memories => "memory",
    }
}

/// ページのCSS変数（欠けた色は既定のスタイルに任せる）
fn page_style(theming: Option<&Theming>, prefs: &DisplayPreferences) -> String {
    let Some(theming) = theming.map(|t| t.for_mode(prefs.mode)) else {
        return String::new();
    };
    ColorRole::ALL
        .into_iter()
        .filter(|role| !theming.color(*role).is_empty())
        .map(|role| format!("--page-{}: {};", css_name(role), theming.color(role)))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn css_name(role: ColorRole) -> &'static str {
    match role {
        ColorRole::Background => "bg",
        ColorRole::Text => "text",
        ColorRole::Accent => "accent",
    }
}

#[component]
pub fn Detail(
    content_type: ContentType,
    id: String,
    prefs: ReadSignal<DisplayPreferences>,
    set_prefs: WriteSignal<DisplayPreferences>,
    set_route: WriteSignal<Route>,
    tracker: RequestTracker,
) -> impl IntoView {
    let (state, set_state) = signal(LoadState::<ContentRecord>::Loading);

    let ticket = tracker.begin();
    spawn_local(async move {
        let result = load_record(content_type, &id).await;
        if !tracker.is_current(ticket) {
            return;
        }
        match result {
            Ok(record) => set_state.set(LoadState::Ready(record)),
            Err(e) => {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "Failed to load {} {}: {}",
                    singular(content_type),
                    id,
                    e
                )));
                set_state.set(LoadState::Failed(format!(
                    "Could not load this {}. Please try again.",
                    singular(content_type)
                )));
            }
        }
    });

    let back = view! {
        <button class="back-link" on:click=move |_| set_route.set(Route::Gallery(content_type))>
            {format!("← Back to {}", content_type)}
        </button>
    };

    view! {
        <article class=format!("detail detail-{}", content_type)>
            {back}
            {move || match state.get() {
                LoadState::Loading => view! {
                    <div class="loading-container"><p>"Loading..."</p></div>
                }.into_any(),
                LoadState::Failed(message) => view! {
                    <div class="error-container"><p>{message}</p></div>
                }.into_any(),
                LoadState::Ready(record) => view! {
                    <RecordView
                        content_type=content_type
                        record=record
                        prefs=prefs
                        set_prefs=set_prefs
                    />
                }.into_any(),
            }}
        </article>
    }
}

#[component]
fn RecordView(
    content_type: ContentType,
    record: ContentRecord,
    prefs: ReadSignal<DisplayPreferences>,
    set_prefs: WriteSignal<DisplayPreferences>,
) -> impl IntoView {
    let theming = record.theming().cloned();
    let title = record.title().unwrap_or(record.id.as_str()).to_string();
    let date = record.config.date.clone();
    let message = record.body(BodyField::Message).map(str::to_string);
    let content = record.body(BodyField::Content).map(str::to_string);
    let description = record.body(BodyField::Description).map(str::to_string);
    let verses = record.body(BodyField::Verses).map(str::to_string);
    let gateway_url = record.config.bible_gateway_url.clone();
    let show_placeholder = content_type == ContentType::Memories && description.is_none();

    view! {
        <div class="detail-page" style=move || page_style(theming.as_ref(), &prefs.get())>
            <header class="detail-header">
                <h1 class="detail-title">{title}</h1>
                {date.map(|d| view! { <time class="detail-date">{d}</time> })}
            </header>

            {message.map(|text| view! {
                <section class="detail-section detail-message">
                    <h2 class="section-title">"A Message For You"</h2>
                    <Markdown content=Signal::derive(move || text.clone()) />
                </section>
            })}

            {content.map(|text| view! {
                <section class="detail-section detail-content">
                    <Markdown content=Signal::derive(move || text.clone()) />
                </section>
            })}

            {description.map(|text| view! {
                <section class="detail-section detail-description">
                    <Markdown content=Signal::derive(move || text.clone()) />
                </section>
            })}

            {show_placeholder.then(|| view! { <p>"This memory is still being written..."</p> })}

            {verses.map(|text| view! {
                <Verses text=text gateway_url=gateway_url prefs=prefs set_prefs=set_prefs />
            })}

            <footer class="detail-footer">
                <p>{move || format!("I love you {}", prefs.get().heart)}</p>
            </footer>
        </div>
    }
}

#[component]
fn Verses(
    text: String,
    gateway_url: Option<String>,
    prefs: ReadSignal<DisplayPreferences>,
    set_prefs: WriteSignal<DisplayPreferences>,
) -> impl IntoView {
    let on_change = move |ev| {
        if let Ok(version) = event_target_value(&ev).parse::<BibleVersion>() {
            set_prefs.update(|p| p.set_bible_version(version, &mut LocalStore));
        }
    };

    let linked = Signal::derive(move || link_citations(&text, prefs.get().bible_version));

    view! {
        <section class="detail-section detail-verses">
            <h2 class="section-title section-title-scripture">
                <span>"From Scripture"</span>
                <div class="scripture-controls">
                    {gateway_url.map(|url| view! {
                        <a
                            class="bible-gateway-link"
                            href=move || with_version(&url, prefs.get().bible_version)
                            target="_blank"
                            rel="noopener noreferrer"
                            title="Read all verses on Bible Gateway"
                        >
                            "📖"
                        </a>
                    })}
                    <select class="version-selector" aria-label="Select Bible version" on:change=on_change>
                        {BibleVersion::ALL
                            .into_iter()
                            .map(|v| view! {
                                <option value=v.code() selected=move || prefs.get().bible_version == v>
                                    {v.code()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>
            </h2>
            <Markdown content=linked />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartnotes_common::DisplayMode;

    #[test]
    fn test_page_style_modes() {
        let theming = Theming::new("#FFFBEA", "#333333", "#E8A0A0");
        let light = DisplayPreferences::default();
        let dark = DisplayPreferences {
            mode: DisplayMode::Dark,
            ..Default::default()
        };

        assert_eq!(
            page_style(Some(&theming), &light),
            "--page-bg: #FFFBEA; --page-text: #333333; --page-accent: #E8A0A0;"
        );
        assert_eq!(
            page_style(Some(&theming), &dark),
            "--page-bg: #4b4113; --page-text: #cccccc; --page-accent: #d96161;"
        );
        assert_eq!(page_style(None, &dark), "");
    }

    #[test]
    fn test_page_style_skips_missing_colors() {
        let theming = Theming {
            background_color: "#FFFBEA".to_string(),
            ..Default::default()
        };
        let dark = DisplayPreferences {
            mode: DisplayMode::Dark,
            ..Default::default()
        };

        assert_eq!(page_style(Some(&theming), &dark), "--page-bg: #4b4113;");
    }
}
