//! エラー型定義
//!
//! - FetchError: ストレージバックエンドの失敗（詳細つき）
//! - LoadError: ローダーが呼び出し側へ返す唯一のエラー

use thiserror::Error;

/// バックエンドの取得エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP status {status}: {path}")]
    Status { status: u16, path: String },

    #[error("transport error: {0}")]
    Transport(String),
}

/// 読み込みエラー
///
/// 「存在しない」と「形式不正」を区別しない。
/// メッセージには失敗したリソース（type/id/ファイル名）が含まれる。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 失敗理由を付けて生成
    pub fn with_cause(context: impl std::fmt::Display, cause: impl std::fmt::Display) -> Self {
        Self::new(format!("{}: {}", context, cause))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, LoadError>;
