//! 聖書箇所のリンク生成
//!
//! Bible Gateway のURLを組み立て、本文中の引用行（`— Psalm 118:24`）をリンクにする。

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use std::str::FromStr;

const BIBLE_GATEWAY_PASSAGE_URL: &str = "https://www.biblegateway.com/passage/";

/// encodeURIComponent 相当（英数字と `-_.!~*'()` 以外をエスケープ）
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// 引用行の区切り（em dash）
const CITATION_MARK: char = '—';

/// 聖書の訳
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BibleVersion {
    #[default]
    Nkjv,
    Niv,
    Esv,
    Kjv,
    Nlt,
}

impl BibleVersion {
    pub const ALL: [BibleVersion; 5] = [
        BibleVersion::Nkjv,
        BibleVersion::Niv,
        BibleVersion::Esv,
        BibleVersion::Kjv,
        BibleVersion::Nlt,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BibleVersion::Nkjv => "NKJV",
            BibleVersion::Niv => "NIV",
            BibleVersion::Esv => "ESV",
            BibleVersion::Kjv => "KJV",
            BibleVersion::Nlt => "NLT",
        }
    }
}

impl fmt::Display for BibleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BibleVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BibleVersion::ALL
            .into_iter()
            .find(|v| v.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown Bible version: {} (NKJV/NIV/ESV/KJV/NLT)", s))
    }
}

/// 本文中の引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub reference: String,
    pub url: String,
}

/// 箇所のURL
pub fn verse_url(reference: &str, version: BibleVersion) -> String {
    format!(
        "{}?search={}&version={}",
        BIBLE_GATEWAY_PASSAGE_URL,
        utf8_percent_encode(reference, COMPONENT),
        version.code()
    )
}

/// URLの `version` パラメータを差し替える
///
/// http(s) の絶対URLでなければそのまま返す
pub fn with_version(url: &str, version: BibleVersion) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    if !matches!(scheme, "http" | "https") || rest.is_empty() {
        return url.to_string();
    }

    let (without_fragment, fragment) = match url.split_once('#') {
        Some((head, tail)) => (head, Some(tail)),
        None => (url, None),
    };
    let (base, query) = match without_fragment.split_once('?') {
        Some((head, tail)) => (head, tail),
        None => (without_fragment, ""),
    };

    let mut replaced = false;
    let mut pairs: Vec<String> = Vec::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let key = pair.split('=').next().unwrap_or_default();
        if key == "version" {
            if !replaced {
                pairs.push(format!("version={}", version.code()));
                replaced = true;
            }
        } else {
            pairs.push(pair.to_string());
        }
    }
    if !replaced {
        pairs.push(format!("version={}", version.code()));
    }

    let mut out = format!("{}?{}", base, pairs.join("&"));
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// `— Psalm 118:24` 形式の段落を引用として解釈
pub fn parse_citation(text: &str, version: BibleVersion) -> Option<Citation> {
    let (_, rest) = text.split_once(CITATION_MARK)?;
    let reference = rest.trim();
    if reference.is_empty() {
        return None;
    }
    Some(Citation {
        reference: reference.to_string(),
        url: verse_url(reference, version),
    })
}

/// Markdown中の引用段落を 📖 リンクに置き換える
///
/// 1行だけの段落が対象（複数行の段落はそのまま）
pub fn link_citations(markdown: &str, version: BibleVersion) -> String {
    let lines: Vec<&str> = markdown.lines().collect();
    let mut out = Vec::with_capacity(lines.len());

    for (i, line) in lines.iter().enumerate() {
        let blank_before = i == 0 || lines[i - 1].trim().is_empty();
        let blank_after = i + 1 == lines.len() || lines[i + 1].trim().is_empty();
        let single_paragraph = blank_before && blank_after && !line.trim().is_empty();

        match parse_citation(line, version).filter(|_| single_paragraph) {
            Some(citation) => out.push(format!("[📖]({}) {}", citation.url, citation.reference)),
            None => out.push(line.to_string()),
        }
    }

    let mut joined = out.join("\n");
    if markdown.ends_with('\n') {
        joined.push('\n');
    }
    joined
}
