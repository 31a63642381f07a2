use heartnotes_common::LoadError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeartnotesError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("読み込みエラー: {0}")]
    Load(#[from] LoadError),

    #[error("引数エラー: {0}")]
    InvalidArgument(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, HeartnotesError>;
