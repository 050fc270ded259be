use std::io;
use std::path::{Component, Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::errors::Error;

/// Upload ceiling for any stored blob, posters and videos alike.
pub const MAX_BLOB_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Key prefixes under the media root, one per blob kind.
pub const MOVIE_POSTERS: &str = "posters";
pub const MOVIE_VIDEOS: &str = "videos";
pub const SERIES_POSTERS: &str = "series_posters";
pub const SEASON_POSTERS: &str = "season_posters";
pub const EPISODE_VIDEOS: &str = "episodes";

/// Local blob store rooted at `MEDIA_ROOT`. Catalog records reference
/// blobs by relative key, e.g. `videos/heat.mp4`.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the blob for streaming, returning the handle and its length.
    pub async fn open(&self, key: &str) -> io::Result<(File, u64)> {
        let path = self.resolve(key)?;
        let file = File::open(path).await?;
        let len = file.metadata().await?.len();
        Ok((file, len))
    }

    /// Writes a blob under `key`, rejecting payloads over [`MAX_BLOB_BYTES`]
    /// before anything touches the filesystem.
    pub async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), Error> {
        validate_blob_size(bytes.len() as u64)?;
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = File::create(path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        Ok(())
    }

    /// Keys must stay inside the media root.
    fn resolve(&self, key: &str) -> io::Result<PathBuf> {
        let relative = Path::new(key);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if key.is_empty() || escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid media key: {key:?}"),
            ));
        }
        Ok(self.root.join(relative))
    }
}

pub fn validate_blob_size(len: u64) -> Result<(), Error> {
    if len > MAX_BLOB_BYTES {
        return Err(Error::Validation(
            "the maximum file size is 5GB".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    #[test]
    fn size_limit_boundary() {
        assert!(validate_blob_size(MAX_BLOB_BYTES).is_ok());
        assert!(matches!(
            validate_blob_size(MAX_BLOB_BYTES + 1),
            Err(Error::Validation(_))
        ));
    }

    #[tokio::test]
    async fn put_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        store.put("videos/test.mp4", b"not really a video").await.unwrap();

        let (mut file, len) = store.open("videos/test.mp4").await.unwrap();
        assert_eq!(len, 18);
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await.unwrap();
        assert_eq!(contents, b"not really a video");
    }

    #[tokio::test]
    async fn open_missing_blob_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        assert!(store.open("videos/missing.mp4").await.is_err());
    }

    #[tokio::test]
    async fn keys_may_not_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        assert!(store.open("../etc/passwd").await.is_err());
        assert!(store.open("/etc/passwd").await.is_err());
        assert!(store.put("", b"x").await.is_err());
    }
}
