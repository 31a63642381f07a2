//! コンテンツローダー
//!
//! 種別とIDから、一覧・config・Markdown本文を取得してマージする。
//! 取得の失敗はすべて `LoadError` にまとめる（未存在と形式不正を区別しない）。

use crate::error::{LoadError, Result};
use crate::source::{config_path, index_path, item_file_path, ContentSource};
use crate::types::{BodyField, ContentRecord, ContentType, IndexEntry, IndexManifest, ItemConfig};
use futures::future::{join_all, try_join_all};
use std::collections::BTreeMap;

/// バックエンドを持つローダー
#[derive(Debug)]
pub struct ContentLoader<S> {
    source: S,
}

impl<S: ContentSource> ContentLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// index.json を取得（items と groups）
    ///
    /// 取得は1回だけ
    pub async fn fetch_index_with_groups(&self, content_type: ContentType) -> Result<IndexManifest> {
        let context = format!("Failed to load index for {}", content_type);
        let path = index_path(content_type);
        tracing::debug!(%path, "fetching index");

        let text = self
            .source
            .fetch_text(&path)
            .await
            .map_err(|e| LoadError::with_cause(&context, e))?;
        serde_json::from_str(&text).map_err(|e| LoadError::with_cause(&context, e))
    }

    /// 一覧のアイテムだけを取得
    pub async fn fetch_index(&self, content_type: ContentType) -> Result<Vec<IndexEntry>> {
        Ok(self.fetch_index_with_groups(content_type).await?.items)
    }

    /// アイテムの config.json を取得
    pub async fn fetch_config(&self, content_type: ContentType, id: &str) -> Result<ItemConfig> {
        let context = format!("Failed to load config for {}/{}", content_type, id);
        let path = config_path(content_type, id);
        tracing::debug!(%path, "fetching config");

        let text = self
            .source
            .fetch_text(&path)
            .await
            .map_err(|e| LoadError::with_cause(&context, e))?;
        serde_json::from_str(&text).map_err(|e| LoadError::with_cause(&context, e))
    }

    /// アイテム配下のMarkdownを取得
    pub async fn fetch_markdown(&self, content_type: ContentType, id: &str, filename: &str) -> Result<String> {
        let path = item_file_path(content_type, id, filename);
        tracing::debug!(%path, "fetching markdown");

        self.source.fetch_text(&path).await.map_err(|e| {
            LoadError::with_cause(format!("Failed to load {} for {}/{}", filename, content_type, id), e)
        })
    }

    /// 複数IDの config を並行取得し、IDごとの結果を返す
    ///
    /// 1件の失敗は他に影響しない
    pub async fn gather_configs<I>(&self, content_type: ContentType, ids: I) -> Vec<(String, Result<ItemConfig>)>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let fetches = ids.into_iter().map(|id| {
            let id = id.as_ref().to_string();
            async move {
                let result = self.fetch_config(content_type, &id).await;
                (id, result)
            }
        });
        join_all(fetches).await
    }

    /// 複数IDの config を並行取得（失敗したIDは結果に含めない）
    ///
    /// 一覧カードの配色など、欠けても構わない用途向け
    pub async fn fetch_all_configs<I>(&self, content_type: ContentType, ids: I) -> BTreeMap<String, ItemConfig>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.gather_configs(content_type, ids)
            .await
            .into_iter()
            .filter_map(|(id, result)| match result {
                Ok(config) => Some((id, config)),
                Err(e) => {
                    tracing::debug!(%content_type, %id, error = %e, "skipping config");
                    None
                }
            })
            .collect()
    }

    /// 詳細ページ用に config と参照されたMarkdownをまとめて読み込む
    ///
    /// 参照された本文が1つでも取得できなければ全体が失敗する
    pub async fn load_content(&self, content_type: ContentType, id: &str) -> Result<ContentRecord> {
        let config = self.fetch_config(content_type, id).await?;

        let bodies = try_join_all(config.body_references().into_iter().map(|(field, filename)| async move {
            let text = self.fetch_markdown(content_type, id, filename).await?;
            Ok::<(BodyField, String), LoadError>((field, text))
        }))
        .await?;

        tracing::debug!(%content_type, id, bodies = bodies.len(), "content loaded");
        Ok(ContentRecord::new(id, config, bodies.into_iter().collect()))
    }
}
