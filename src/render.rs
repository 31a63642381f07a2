//! 端末向けの整形
//!
//! 本文のMarkdownはそのまま出し、聖書の引用行だけリンクに置き換える

use heartnotes_common::{
    link_citations, with_version, BodyField, ContentRecord, ContentType, DisplayPreferences,
    IndexEntry, IndexManifest, ItemConfig, Theming,
};
use std::collections::BTreeMap;
use std::fmt::Write;

fn entry_line(entry: &IndexEntry) -> String {
    let mut line = format!("- {} ({})", display_title(entry), entry.id);
    if let Some(detail) = entry.subtitle.as_deref().or(entry.date.as_deref()) {
        let _ = write!(line, " — {}", detail);
    }
    line
}

fn display_title(entry: &IndexEntry) -> &str {
    if entry.title.is_empty() {
        entry.id.as_str()
    } else {
        entry.title.as_str()
    }
}

/// 一覧
pub fn render_index(items: &[IndexEntry]) -> String {
    if items.is_empty() {
        return "Coming soon...\n".to_string();
    }
    items.iter().map(|entry| entry_line(entry) + "\n").collect()
}

/// グループ別の一覧（グループに属さないアイテムは出さない）
pub fn render_grouped(manifest: &IndexManifest) -> String {
    if manifest.groups.is_empty() {
        return render_index(&manifest.items);
    }

    let mut out = String::new();
    for (group, items) in manifest.grouped() {
        let _ = writeln!(out, "## {}", group.title);
        if let Some(description) = &group.description {
            let _ = writeln!(out, "{}", description);
        }
        for entry in items {
            let _ = writeln!(out, "{}", entry_line(entry));
        }
        out.push('\n');
    }
    out
}

/// 配色を1行で
pub fn render_theming(theming: &Theming) -> String {
    format!(
        "background {}  text {}  accent {}",
        theming.background_color, theming.text_color, theming.accent_color
    )
}

/// カード一覧（config の配色を優先、無ければ一覧側の配色）
pub fn render_gallery(
    items: &[IndexEntry],
    configs: &BTreeMap<String, ItemConfig>,
    prefs: &DisplayPreferences,
) -> String {
    if items.is_empty() {
        return "Coming soon...\n".to_string();
    }

    let mut out = String::new();
    for entry in items {
        let _ = writeln!(out, "{}", entry_line(entry));
        let theming = configs
            .get(&entry.id)
            .and_then(|config| config.theming.as_ref())
            .or(entry.theming.as_ref());
        if let Some(theming) = theming {
            let _ = writeln!(out, "    {}", render_theming(&theming.for_mode(prefs.mode)));
        }
    }
    out
}

fn section_heading(content_type: ContentType, field: BodyField) -> Option<&'static str> {
    match (content_type, field) {
        (ContentType::Feelings, BodyField::Message) => Some("A Message For You"),
        (_, BodyField::Verses) => Some("From Scripture"),
        _ => None,
    }
}

/// 詳細ページ
pub fn render_record(content_type: ContentType, record: &ContentRecord, prefs: &DisplayPreferences) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", record.title().unwrap_or(record.id.as_str()));
    if let Some(date) = &record.config.date {
        let _ = writeln!(out, "{}", date);
    }
    if let Some(theming) = record.theming() {
        let _ = writeln!(out, "[{}] {}", prefs.mode, render_theming(&theming.for_mode(prefs.mode)));
    }
    out.push('\n');

    let mut has_body = false;
    for field in BodyField::ALL {
        let Some(body) = record.body(field) else {
            continue;
        };
        has_body = true;

        if let Some(heading) = section_heading(content_type, field) {
            let _ = writeln!(out, "## {}", heading);
        }
        if field == BodyField::Verses {
            if let Some(url) = &record.config.bible_gateway_url {
                let _ = writeln!(out, "📖 {} ({})", with_version(url, prefs.bible_version), prefs.bible_version);
            }
            let _ = writeln!(out, "{}", link_citations(body, prefs.bible_version).trim_end());
        } else {
            let _ = writeln!(out, "{}", body.trim_end());
        }
        out.push('\n');
    }

    if !has_body && content_type == ContentType::Memories {
        let _ = writeln!(out, "This memory is still being written...\n");
    }

    let _ = writeln!(out, "I love you {}", prefs.heart);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartnotes_common::{BibleVersion, DisplayMode, GroupEntry};

    fn entry(id: &str, title: &str) -> IndexEntry {
        IndexEntry {
            id: id.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    fn dark_prefs() -> DisplayPreferences {
        DisplayPreferences {
            mode: DisplayMode::Dark,
            heart: "💜",
            bible_version: BibleVersion::Esv,
        }
    }

    #[test]
    fn test_render_index_empty() {
        assert_eq!(render_index(&[]), "Coming soon...\n");
    }

    #[test]
    fn test_render_index_lines() {
        let mut joy = entry("joy", "Joy");
        joy.subtitle = Some("when the sun is out".to_string());
        let out = render_index(&[joy, entry("fear", "")]);

        assert_eq!(out, "- Joy (joy) — when the sun is out\n- fear (fear)\n");
    }

    #[test]
    fn test_render_grouped_drops_orphans() {
        let mut joy = entry("joy", "Joy");
        joy.group = Some("good".to_string());
        let mut lost = entry("lost", "Lost");
        lost.group = Some("nowhere".to_string());
        let manifest = IndexManifest {
            items: vec![joy, lost],
            groups: vec![GroupEntry {
                id: "good".to_string(),
                title: "Good days".to_string(),
                description: None,
            }],
        };

        let out = render_grouped(&manifest);
        assert!(out.contains("## Good days"));
        assert!(out.contains("Joy (joy)"));
        assert!(!out.contains("Lost"));
    }

    #[test]
    fn test_render_gallery_uses_dark_theming() {
        let mut configs = BTreeMap::new();
        configs.insert(
            "joy".to_string(),
            ItemConfig {
                theming: Some(Theming::new("#FFFBEA", "#333333", "#E8A0A0")),
                ..Default::default()
            },
        );
        let out = render_gallery(&[entry("joy", "Joy"), entry("fear", "Fear")], &configs, &dark_prefs());

        assert!(out.contains("background #4b4113  text #cccccc  accent #d96161"));
        assert!(out.contains("Fear (fear)"));
    }

    #[test]
    fn test_render_record_feeling() {
        let config = ItemConfig {
            title: Some("Joy".to_string()),
            bible_gateway_url: Some("https://www.biblegateway.com/passage/?search=Psalm+16&version=NIV".to_string()),
            ..Default::default()
        };
        let mut bodies = BTreeMap::new();
        bodies.insert(BodyField::Message, "You are loved.\n".to_string());
        bodies.insert(BodyField::Verses, "The joy of the Lord is your strength.\n\n— Nehemiah 8:10".to_string());
        let record = ContentRecord::new("joy", config, bodies);

        let out = render_record(ContentType::Feelings, &record, &dark_prefs());
        assert!(out.starts_with("# Joy\n"));
        assert!(out.contains("## A Message For You\nYou are loved.\n"));
        assert!(out.contains("## From Scripture"));
        assert!(out.contains("search=Psalm+16&version=ESV"));
        assert!(out.contains("[📖](https://www.biblegateway.com/passage/?search=Nehemiah%208%3A10&version=ESV) Nehemiah 8:10"));
        assert!(out.ends_with("I love you 💜\n"));
    }

    #[test]
    fn test_render_record_empty_memory() {
        let record = ContentRecord::new("beach", ItemConfig::default(), BTreeMap::new());
        let out = render_record(ContentType::Memories, &record, &DisplayPreferences::default());

        assert!(out.starts_with("# beach\n"));
        assert!(out.contains("This memory is still being written..."));
    }
}
