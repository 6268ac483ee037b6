//! Image store: names and writes uploaded images.
//!
//! Every payload gets its own file, opened with create-new semantics, written
//! in full, flushed and closed before `persist` returns. Names are derived from
//! the wall clock in nanoseconds; when that name is already taken a numeric
//! suffix is appended, so two payloads never share a file.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::constants::{IMAGE_FILE_EXTENSION, IMAGE_FILE_PREFIX, MAX_NAME_ATTEMPTS};
use crate::error::StorageError;

/// A successfully persisted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// File name relative to the store directory.
    pub file_name: String,
    /// Full path of the written file.
    pub path: PathBuf,
    /// Number of bytes written.
    pub bytes: usize,
}

/// Writes uploaded images into a single directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store writing into `dir`. The directory is not created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Persist one payload under a fresh timestamp-derived name.
    pub async fn persist(&self, payload: &[u8]) -> Result<StoredImage, StorageError> {
        self.persist_with_stamp(payload, unix_nanos()).await
    }

    pub(crate) async fn persist_with_stamp(
        &self,
        payload: &[u8],
        stamp: u128,
    ) -> Result<StoredImage, StorageError> {
        let (file_name, path, mut file) = self.create_unique(stamp).await?;

        if let Err(source) = write_payload(&mut file, payload).await {
            return Err(StorageError::Write { path, source });
        }

        Ok(StoredImage {
            file_name,
            path,
            bytes: payload.len(),
        })
    }

    async fn create_unique(&self, stamp: u128) -> Result<(String, PathBuf, File), StorageError> {
        let mut attempt = 0;
        loop {
            let file_name = image_file_name(stamp, attempt);
            let path = self.dir.join(&file_name);

            match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => return Ok((file_name, path, file)),
                Err(err)
                    if err.kind() == std::io::ErrorKind::AlreadyExists
                        && attempt < MAX_NAME_ATTEMPTS =>
                {
                    debug!("{} already exists, trying next suffix", path.display());
                    attempt += 1;
                }
                Err(source) => return Err(StorageError::Create { path, source }),
            }
        }
    }
}

async fn write_payload(file: &mut File, payload: &[u8]) -> std::io::Result<()> {
    file.write_all(payload).await?;
    file.flush().await
}

/// File name for an image stamped at `stamp` nanoseconds past the epoch.
///
/// `attempt` 0 yields `received_image_<stamp>.png`; later attempts yield
/// `received_image_<stamp>-<attempt>.png`.
pub fn image_file_name(stamp: u128, attempt: u32) -> String {
    if attempt == 0 {
        format!("{}{}.{}", IMAGE_FILE_PREFIX, stamp, IMAGE_FILE_EXTENSION)
    } else {
        format!(
            "{}{}-{}.{}",
            IMAGE_FILE_PREFIX, stamp, attempt, IMAGE_FILE_EXTENSION
        )
    }
}

fn unix_nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_file_name_format() {
        assert_eq!(
            image_file_name(1_700_000_000_123_456_789, 0),
            "received_image_1700000000123456789.png"
        );
        assert_eq!(image_file_name(42, 3), "received_image_42-3.png");
    }

    #[tokio::test]
    async fn test_persist_writes_exact_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let stored = store.persist(&[0x01, 0x02, 0x03]).await.expect("persist");

        assert!(stored.file_name.starts_with("received_image_"));
        assert!(stored.file_name.ends_with(".png"));
        assert_eq!(stored.bytes, 3);
        assert_eq!(stored.path, dir.path().join(&stored.file_name));
        assert_eq!(std::fs::read(&stored.path).expect("read"), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_same_stamp_never_reuses_a_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let first = store.persist_with_stamp(b"first", 7).await.expect("first");
        let second = store.persist_with_stamp(b"second", 7).await.expect("second");

        assert_eq!(first.file_name, "received_image_7.png");
        assert_eq!(second.file_name, "received_image_7-1.png");
        assert_eq!(std::fs::read(&first.path).expect("read"), b"first");
        assert_eq!(std::fs::read(&second.path).expect("read"), b"second");
    }

    #[tokio::test]
    async fn test_missing_directory_is_a_create_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path().join("gone"));

        let err = store.persist(b"data").await.unwrap_err();

        assert!(matches!(err, StorageError::Create { .. }));
        assert!(err.path().starts_with(dir.path().join("gone")));
    }

    #[tokio::test]
    async fn test_sequential_persists_produce_distinct_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ImageStore::new(dir.path());

        let a = store.persist(b"a").await.expect("a");
        let b = store.persist(b"b").await.expect("b");

        assert_ne!(a.file_name, b.file_name);
        assert_eq!(std::fs::read_dir(dir.path()).expect("read_dir").count(), 2);
    }
}
