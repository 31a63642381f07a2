//! Markdown表示

use leptos::prelude::*;
use pulldown_cmark::{html, Options, Parser};

pub fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[component]
pub fn Markdown(#[prop(into)] content: Signal<String>) -> impl IntoView {
    view! {
        <div class="markdown" inner_html=move || markdown_to_html(&content.get())></div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html() {
        let out = markdown_to_html("# Hello\n\nYou are *loved*.");
        assert!(out.contains("<h1>Hello</h1>"));
        assert!(out.contains("<em>loved</em>"));
    }
}
