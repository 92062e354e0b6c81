//! Local-filesystem storage backend (development and tests).

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::{StorageError, StorageProvider};

/// Stores objects as files under a root directory.
pub struct LocalProvider {
    root: PathBuf,
    public_url: String,
}

impl LocalProvider {
    pub fn new(root: PathBuf, public_url: String) -> Self {
        Self { root, public_url }
    }

    /// Resolve a key to a path under the root, rejecting traversal.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let rel = Path::new(key);
        let traverses = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || traverses {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

#[async_trait]
impl StorageProvider for LocalProvider {
    async fn put(
        &self,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, bytes).await?;

        tracing::debug!(key, "Stored object locally");
        Ok(format!("{}/{key}", self.public_url))
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(dir: &tempfile::TempDir) -> LocalProvider {
        LocalProvider::new(
            dir.path().to_path_buf(),
            "http://localhost:3000/media".into(),
        )
    }

    #[tokio::test]
    async fn put_writes_file_and_returns_url() {
        let dir = tempfile::tempdir().unwrap();
        let p = provider(&dir);

        let url = p
            .put("jane@acme.io/7/front.png", b"png-bytes".to_vec(), "image/png")
            .await
            .unwrap();

        assert_eq!(url, "http://localhost:3000/media/jane@acme.io/7/front.png");
        let on_disk = std::fs::read(dir.path().join("jane@acme.io/7/front.png")).unwrap();
        assert_eq!(on_disk, b"png-bytes");
    }

    #[tokio::test]
    async fn put_overwrites_existing_object() {
        let dir = tempfile::tempdir().unwrap();
        let p = provider(&dir);

        p.put("a@b.co/1/front.png", b"old".to_vec(), "image/png")
            .await
            .unwrap();
        p.put("a@b.co/1/front.png", b"new".to_vec(), "image/png")
            .await
            .unwrap();

        let on_disk = std::fs::read(dir.path().join("a@b.co/1/front.png")).unwrap();
        assert_eq!(on_disk, b"new");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let p = provider(&dir);

        p.put("a@b.co/1/back.jpg", b"x".to_vec(), "image/jpeg")
            .await
            .unwrap();
        p.delete("a@b.co/1/back.jpg").await.unwrap();
        // Second delete of a missing object is still Ok.
        p.delete("a@b.co/1/back.jpg").await.unwrap();
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = provider(&dir);

        let err = p
            .put("../escape.png", b"x".to_vec(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
