use crate::error::{HeartnotesError, Result};
use heartnotes_common::preferences::{BIBLE_VERSION_KEY, THEME_KEY};
use heartnotes_common::PreferenceStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定のコンテンツ配置（静的ファイルのルート）
pub const DEFAULT_BASE: &str = "./public";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// コンテンツのベース（ディレクトリまたは http(s) URL）
    pub base: String,

    /// 表示モード（"light" / "dark"）、未設定ならシステムに従う
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// 聖書訳のコード
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_bible_version: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.into(),
            theme: None,
            preferred_bible_version: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルが無ければ既定値
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| HeartnotesError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("heartnotes").join("config.json"))
    }

    /// 環境変数 HEARTNOTES_BASE を優先
    pub fn base(&self) -> String {
        std::env::var("HEARTNOTES_BASE").unwrap_or_else(|_| self.base.clone())
    }
}

/// 表示設定は設定ファイルの2キーに保存する
impl PreferenceStore for Config {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            THEME_KEY => self.theme.clone(),
            BIBLE_VERSION_KEY => self.preferred_bible_version.clone(),
            _ => None,
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match key {
            THEME_KEY => self.theme = Some(value.to_string()),
            BIBLE_VERSION_KEY => self.preferred_bible_version = Some(value.to_string()),
            other => tracing::warn!(key = other, "unknown preference key"),
        }
    }
}
