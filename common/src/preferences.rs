//! 表示設定
//!
//! アプリのルートで一度だけ組み立て、必要なコンポーネントへ明示的に渡す。
//! 永続化は文字列キーのストア（ブラウザの localStorage / CLIの設定ファイル）に任せる。

use crate::scripture::BibleVersion;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 表示モードの保存キー
pub const THEME_KEY: &str = "theme";

/// 聖書訳の保存キー
pub const BIBLE_VERSION_KEY: &str = "preferred-bible-version";

/// 起動時にひとつ選ばれるハート
pub const HEART_EMOJIS: [&str; 10] = ["🤍", "❤️", "🧡", "💛", "💚", "💙", "💜", "🩷", "🩵", "🩶"];

/// ライト / ダーク
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Light => "light",
            DisplayMode::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            DisplayMode::Light => DisplayMode::Dark,
            DisplayMode::Dark => DisplayMode::Light,
        }
    }

    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            DisplayMode::Dark
        } else {
            DisplayMode::Light
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(DisplayMode::Light),
            "dark" => Ok(DisplayMode::Dark),
            other => Err(format!("unknown display mode: {}", other)),
        }
    }
}

/// 文字列キーの永続ストア
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// メモリ上のストア（テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// 表示設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPreferences {
    pub mode: DisplayMode,
    pub heart: &'static str,
    pub bible_version: BibleVersion,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            mode: DisplayMode::Light,
            heart: HEART_EMOJIS[0],
            bible_version: BibleVersion::default(),
        }
    }
}

impl DisplayPreferences {
    /// ストアから読み込む
    ///
    /// - モード: 保存値 → システム設定
    /// - 聖書訳: 保存値 → NKJV
    /// - ハート: `heart_index` で選ぶ（呼び出し側が乱数を渡す）
    pub fn load(store: &impl PreferenceStore, system_prefers_dark: bool, heart_index: usize) -> Self {
        let mode = store
            .get(THEME_KEY)
            .and_then(|saved| saved.parse().ok())
            .unwrap_or_else(|| DisplayMode::from_dark(system_prefers_dark));
        let bible_version = store
            .get(BIBLE_VERSION_KEY)
            .and_then(|saved| saved.parse().ok())
            .unwrap_or_default();

        Self {
            mode,
            heart: HEART_EMOJIS[heart_index % HEART_EMOJIS.len()],
            bible_version,
        }
    }

    pub fn is_dark(&self) -> bool {
        self.mode == DisplayMode::Dark
    }

    /// モードを切り替えて保存
    pub fn toggle_mode(&mut self, store: &mut impl PreferenceStore) -> DisplayMode {
        self.mode = self.mode.toggled();
        store.set(THEME_KEY, self.mode.as_str());
        self.mode
    }

    pub fn set_bible_version(&mut self, version: BibleVersion, store: &mut impl PreferenceStore) {
        self.bible_version = version;
        store.set(BIBLE_VERSION_KEY, version.code());
    }

    /// システム設定の変化に追従する（ユーザーが明示的に選んでいない場合のみ）
    ///
    /// 変化した場合は true
    pub fn follow_system(&mut self, store: &impl PreferenceStore, system_prefers_dark: bool) -> bool {
        if store.get(THEME_KEY).is_some() {
            return false;
        }
        let mode = DisplayMode::from_dark(system_prefers_dark);
        let changed = mode != self.mode;
        self.mode = mode;
        changed
    }
}
