//! ストレージバックエンド
//!
//! リソースはベースパスからの相対パスで指定する:
//! - `<type>/index.json`
//! - `<type>/<id>/config.json`
//! - `<type>/<id>/<filename>`
//!
//! 静的ファイル・HTTP・ブラウザの fetch など、この配置を満たせば何でもよい。

use crate::error::FetchError;
use crate::types::ContentType;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// テキストリソースの取得
///
/// ブラウザでは単一スレッドで動くため、返す Future に Send は要求しない
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError>;
}

/// 一覧のパス
pub fn index_path(content_type: ContentType) -> String {
    format!("{}/index.json", content_type)
}

/// config.json のパス
pub fn config_path(content_type: ContentType, id: &str) -> String {
    format!("{}/{}/config.json", content_type, id)
}

/// アイテム配下のファイルのパス
pub fn item_file_path(content_type: ContentType, id: &str, filename: &str) -> String {
    format!("{}/{}/{}", content_type, id, filename)
}

/// メモリ上のバックエンド（テスト・プレビュー用）
///
/// 取得回数を数える
#[derive(Debug, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(path, body);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, body: impl Into<String>) {
        self.files.insert(path.into(), body.into());
    }

    /// これまでの fetch_text 呼び出し回数
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ContentSource for MemorySource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(path.to_string()))
    }
}
