//! CLI用のバックエンド
//!
//! ベースが http(s) URL ならHTTP、それ以外はローカルディレクトリとして扱う

pub mod fs;
pub mod http;

pub use fs::FsSource;
pub use http::HttpSource;

use crate::error::Result;
use heartnotes_common::{ContentSource, FetchError};

#[derive(Debug, Clone)]
pub enum Source {
    Fs(FsSource),
    Http(HttpSource),
}

impl Source {
    pub fn from_base(base: &str) -> Result<Self> {
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(Source::Http(HttpSource::new(base)?))
        } else {
            Ok(Source::Fs(FsSource::new(base)))
        }
    }
}

impl ContentSource for Source {
    async fn fetch_text(&self, path: &str) -> std::result::Result<String, FetchError> {
        match self {
            Source::Fs(source) => source.fetch_text(path).await,
            Source::Http(source) => source.fetch_text(path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base() {
        assert!(matches!(Source::from_base("./public").unwrap(), Source::Fs(_)));
        assert!(matches!(Source::from_base("/srv/site").unwrap(), Source::Fs(_)));
        assert!(matches!(Source::from_base("https://example.com/").unwrap(), Source::Http(_)));
        assert!(matches!(Source::from_base("http://localhost:5173").unwrap(), Source::Http(_)));
    }
}
