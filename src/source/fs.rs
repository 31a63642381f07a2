//! ローカルディレクトリのバックエンド

use heartnotes_common::{ContentSource, FetchError};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// ルート配下のパスに解決（`..` や絶対パスは拒否）
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path);
        let safe = relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)));
        if !safe || path.is_empty() {
            return None;
        }
        Some(self.root.join(relative))
    }
}

impl ContentSource for FsSource {
    async fn fetch_text(&self, path: &str) -> Result<String, FetchError> {
        let full_path = self
            .resolve(path)
            .ok_or_else(|| FetchError::NotFound(path.to_string()))?;

        match tokio::fs::read_to_string(&full_path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(FetchError::NotFound(full_path.display().to_string()))
            }
            Err(e) => Err(FetchError::Transport(format!("{}: {}", full_path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rejects_traversal() {
        let source = FsSource::new("/srv/site");
        assert_eq!(
            source.resolve("feelings/index.json"),
            Some(PathBuf::from("/srv/site/feelings/index.json"))
        );
        assert_eq!(source.resolve("feelings/../../etc/passwd"), None);
        assert_eq!(source.resolve("/etc/passwd"), None);
        assert_eq!(source.resolve("./feelings/index.json"), None);
        assert_eq!(source.resolve(""), None);
    }
}
