//! Local disk storage for uploaded files.

use std::path::{Path, PathBuf};

use chrono::Utc;

use super::error::StorageError;

/// A file written to the local store.
#[derive(Debug, Clone)]
pub struct StoredFile {
    /// Generated file name (`<millisecond-timestamp>-<original-name>`).
    pub name: String,
    /// Path of the file on disk.
    pub path: PathBuf,
}

/// Local disk store for uploaded files.
///
/// Files are written under a fixed root directory with names of the form
/// `<millisecond-timestamp>-<original-name>`. Uniqueness relies on timestamp
/// granularity alone: two uploads of the same file name in the same
/// millisecond silently overwrite each other. That race is accepted and
/// unmitigated.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the root directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Root directory files are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write one uploaded file to disk under a timestamped name.
    ///
    /// # Errors
    ///
    /// Returns an error if the disk write fails.
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredFile, StorageError> {
        let name = timestamped_name(original_name);
        let path = self.root.join(&name);
        tokio::fs::write(&path, data).await?;
        Ok(StoredFile { name, path })
    }

    /// Remove a previously stored file by its generated name.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be deleted.
    pub async fn remove(&self, name: &str) -> Result<(), StorageError> {
        let path = self.root.join(base_name(name));
        tokio::fs::remove_file(&path).await?;
        Ok(())
    }
}

/// Generate the timestamped storage name for an upload.
///
/// Format: `<millisecond-timestamp>-<original-name>`, with the original name
/// reduced to its final path component so crafted names cannot escape the
/// uploads root.
#[must_use]
pub fn timestamped_name(original_name: &str) -> String {
    format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        base_name(original_name)
    )
}

/// Final path component of an uploaded file name.
#[must_use]
pub fn base_name(name: &str) -> &str {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("file")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("invoice.pdf", "invoice.pdf")]
    #[case("nested/path/photo.png", "photo.png")]
    #[case("../../etc/passwd", "passwd")]
    #[case("..", "file")]
    #[case("", "file")]
    fn test_base_name(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(base_name(input), expected);
    }

    #[test]
    fn test_timestamped_name_format() {
        let before = Utc::now().timestamp_millis();
        let name = timestamped_name("report.pdf");
        let after = Utc::now().timestamp_millis();

        let (prefix, rest) = name.split_once('-').expect("name should contain '-'");
        let millis: i64 = prefix.parse().expect("prefix should be a timestamp");
        assert!(millis >= before && millis <= after);
        assert_eq!(rest, "report.pdf");
    }

    #[test]
    fn test_timestamped_name_keeps_hyphens_in_original() {
        let name = timestamped_name("my-report-v2.pdf");
        let (_, rest) = name.split_once('-').expect("name should contain '-'");
        assert_eq!(rest, "my-report-v2.pdf");
    }

    #[tokio::test]
    async fn test_store_writes_bytes_to_root() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = LocalStore::new(dir.path()).expect("should create store");

        let stored = store.store("hello.txt", b"hello world").await.expect("store");
        assert!(stored.path.starts_with(dir.path()));
        assert!(stored.name.ends_with("-hello.txt"));

        let read_back = std::fs::read(&stored.path).expect("read back");
        assert_eq!(read_back, b"hello world");
    }

    #[tokio::test]
    async fn test_store_same_name_twice_is_not_an_error() {
        // Same-millisecond collisions overwrite; either way both calls succeed
        // and at most two files exist afterwards.
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = LocalStore::new(dir.path()).expect("should create store");

        let first = store.store("a.txt", b"one").await.expect("first store");
        let second = store.store("a.txt", b"two").await.expect("second store");

        let entries = std::fs::read_dir(dir.path()).expect("read dir").count();
        if first.name == second.name {
            assert_eq!(entries, 1);
            assert_eq!(std::fs::read(&second.path).expect("read"), b"two");
        } else {
            assert_eq!(entries, 2);
        }
    }

    #[tokio::test]
    async fn test_remove_deletes_stored_file() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = LocalStore::new(dir.path()).expect("should create store");

        let stored = store.store("gone.bin", &[0u8; 16]).await.expect("store");
        store.remove(&stored.name).await.expect("remove");
        assert!(!stored.path.exists());
    }

    #[tokio::test]
    async fn test_remove_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let store = LocalStore::new(dir.path()).expect("should create store");

        let err = store.remove("1700000000000-nope.txt").await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
