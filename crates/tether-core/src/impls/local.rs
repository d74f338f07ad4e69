//! LocalBlobClient - ローカルファイルシステム上の blob ストレージ
//!
//! `root/container/name` に保存します。書き込みは隣の一時ファイルに行い、
//! commit で rename するので、読み手には古い内容か新しい内容のどちらかしか見えません。

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use ulid::Ulid;

use crate::domain::{BlobRef, StorageError};
use crate::ports::{BlobClient, BlobWriteStream};

#[derive(Debug, Clone)]
pub struct LocalBlobClient {
    root: PathBuf,
}

impl LocalBlobClient {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a blob onto the filesystem, refusing anything that would escape `root`.
    fn path_for(&self, blob: &BlobRef) -> Result<PathBuf, StorageError> {
        let relative = Path::new(blob.path.container()).join(blob.path.name());
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes {
            return Err(StorageError::Rejected(format!(
                "blob path {} is not a plain relative path",
                blob.path
            )));
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobClient for LocalBlobClient {
    async fn open_write(&self, blob: &BlobRef) -> Result<Box<dyn BlobWriteStream>, StorageError> {
        let target = self.path_for(blob)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file_name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let staging = target.with_file_name(format!(".{file_name}.{}.partial", Ulid::new()));
        let file = File::create(&staging).await?;
        debug!(staging = %staging.display(), "local: opened write stream");

        Ok(Box::new(LocalWriteStream {
            file: Some(file),
            staging,
            target,
            committed: false,
        }))
    }

    async fn exists(&self, blob: &BlobRef) -> Result<bool, StorageError> {
        Ok(fs::try_exists(self.path_for(blob)?).await?)
    }

    async fn read(&self, blob: &BlobRef) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(blob)?).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

struct LocalWriteStream {
    file: Option<File>,
    staging: PathBuf,
    target: PathBuf,
    committed: bool,
}

impl LocalWriteStream {
    fn file(&mut self) -> Result<&mut File, StorageError> {
        self.file
            .as_mut()
            .ok_or_else(|| StorageError::Rejected("write stream already committed".to_string()))
    }
}

#[async_trait]
impl BlobWriteStream for LocalWriteStream {
    async fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        self.file()?.write_all(buf).await?;
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        let file = self.file()?;
        file.flush().await?;
        file.sync_all().await?;
        self.file = None;

        fs::rename(&self.staging, &self.target).await?;
        self.committed = true;
        Ok(())
    }

    fn release(&mut self) {
        self.file = None;
        if self.committed {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.staging)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(staging = %self.staging.display(), error = %e, "failed to discard staged blob");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlobPath;

    fn blob(name: &str) -> BlobRef {
        BlobRef::block(BlobPath::new("output", name).unwrap())
    }

    fn staged_files(dir: &Path) -> usize {
        std::fs::read_dir(dir)
            .unwrap()
            .filter(|e| {
                e.as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".partial")
            })
            .count()
    }

    #[tokio::test]
    async fn commit_makes_content_visible() {
        let dir = tempfile::tempdir().unwrap();
        let client = LocalBlobClient::new(dir.path());
        let target = blob("nested/result.txt");

        let mut stream = client.open_write(&target).await.unwrap();
        stream.write(b"hello").await.unwrap();
        assert!(!client.exists(&target).await.unwrap());

        stream.commit().await.unwrap();
        stream.release();

        assert_eq!(client.read(&target).await.unwrap(), Some(b"hello".to_vec()));
        assert_eq!(staged_files(&dir.path().join("output/nested")), 0);
    }

    #[tokio::test]
    async fn release_without_commit_keeps_old_content() {
        let dir = tempfile::tempdir().unwrap();
        let client = LocalBlobClient::new(dir.path());
        let target = blob("result.txt");
        std::fs::create_dir_all(dir.path().join("output")).unwrap();
        std::fs::write(dir.path().join("output/result.txt"), b"old").unwrap();

        let mut stream = client.open_write(&target).await.unwrap();
        stream.write(b"new").await.unwrap();
        stream.release();

        assert_eq!(client.read(&target).await.unwrap(), Some(b"old".to_vec()));
        assert_eq!(staged_files(&dir.path().join("output")), 0);
    }

    #[tokio::test]
    async fn missing_blob_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let client = LocalBlobClient::new(dir.path());

        assert_eq!(client.read(&blob("absent.txt")).await.unwrap(), None);
        assert!(!client.exists(&blob("absent.txt")).await.unwrap());
    }

    #[tokio::test]
    async fn parent_segments_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let client = LocalBlobClient::new(dir.path());

        let err = match client.open_write(&blob("../escape.txt")).await {
            Ok(_) => panic!("path escaping the root should be rejected"),
            Err(e) => e,
        };
        assert!(matches!(err, StorageError::Rejected(_)));
    }
}
