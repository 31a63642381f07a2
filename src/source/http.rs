//! HTTPバックエンド（静的サイト・CDN）

use crate::error::Result;
use heartnotes_common::{ContentSource, FetchError};
use std::time::Duration;

const TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            base_url: normalize_base(base_url),
            client,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 末尾を `/` で揃える
fn normalize_base(base_url: &str) -> String {
    if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    }
}

impl ContentSource for HttpSource {
    async fn fetch_text(&self, path: &str) -> std::result::Result<String, FetchError> {
        let url = self.url_for(path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url));
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                path: url,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for() {
        let source = HttpSource::new("https://example.com/site").expect("クライアント生成失敗");
        assert_eq!(
            source.url_for("feelings/index.json"),
            "https://example.com/site/feelings/index.json"
        );

        let source = HttpSource::new("https://example.com/").expect("クライアント生成失敗");
        assert_eq!(source.url_for("letters/a/config.json"), "https://example.com/letters/a/config.json");
    }
}
