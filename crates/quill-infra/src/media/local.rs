use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use quill_core::domain::slug::slugify;
use quill_core::ports::{MediaError, MediaStorage};

/// Stores uploads on the local filesystem under a media root.
#[derive(Debug, Clone)]
pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Split an uploaded name into a slugified stem and a lowercase extension.
    fn clean_name(filename: &str) -> Result<(String, String), MediaError> {
        let name = Path::new(filename)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MediaError::InvalidName(filename.to_string()))?;

        let (stem, ext) = name
            .rsplit_once('.')
            .ok_or_else(|| MediaError::InvalidName(filename.to_string()))?;

        let ext = ext.to_ascii_lowercase();
        if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MediaError::InvalidName(filename.to_string()));
        }

        let stem = slugify(stem);
        let stem = if stem.is_empty() { "upload".to_string() } else { stem };
        Ok((stem, ext))
    }

    /// Reject anything that could escape the media root.
    fn resolve(&self, relative: &str) -> Result<PathBuf, MediaError> {
        let path = Path::new(relative);
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(MediaError::InvalidName(relative.to_string()));
        }
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store(
        &self,
        prefix: &str,
        filename: &str,
        bytes: &[u8],
        uploaded_at: DateTime<Utc>,
    ) -> Result<String, MediaError> {
        let (stem, ext) = Self::clean_name(filename)?;
        let dir = format!("{}/{}", prefix, uploaded_at.format("%Y/%m/%d"));
        tokio::fs::create_dir_all(self.resolve(&dir)?)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        let mut relative = format!("{dir}/{stem}.{ext}");
        if tokio::fs::try_exists(self.resolve(&relative)?)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?
        {
            let suffix = Uuid::new_v4().simple().to_string();
            relative = format!("{dir}/{stem}_{}.{ext}", &suffix[..7]);
        }

        tokio::fs::write(self.resolve(&relative)?, bytes)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;
        tracing::info!(path = %relative, size = bytes.len(), "Stored upload");

        Ok(relative)
    }

    async fn delete(&self, path: &str) -> Result<(), MediaError> {
        match tokio::fs::remove_file(self.resolve(path)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_store_uses_date_partitioned_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        let path = storage
            .store("posts", "My Holiday Photo.JPG", b"data", day())
            .await
            .unwrap();

        assert_eq!(path, "posts/2024/03/09/my-holiday-photo.jpg");
        let written = std::fs::read(dir.path().join(&path)).unwrap();
        assert_eq!(written, b"data");
    }

    #[tokio::test]
    async fn test_name_collision_gets_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        let first = storage.store("posts", "a.png", b"1", day()).await.unwrap();
        let second = storage.store("posts", "a.png", b"2", day()).await.unwrap();

        assert_ne!(first, second);
        assert!(second.starts_with("posts/2024/03/09/a_"));
        assert!(second.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_directory_components_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        let path = storage
            .store("posts", "../../etc/passwd.png", b"x", day())
            .await
            .unwrap();
        assert_eq!(path, "posts/2024/03/09/passwd.png");
    }

    #[tokio::test]
    async fn test_missing_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        let result = storage.store("posts", "noext", b"x", day()).await;
        assert!(matches!(result, Err(MediaError::InvalidName(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalMediaStorage::new(dir.path());

        let path = storage.store("posts", "b.gif", b"x", day()).await.unwrap();
        storage.delete(&path).await.unwrap();
        storage.delete(&path).await.unwrap();
        assert!(storage.delete("../outside.txt").await.is_err());
    }
}
