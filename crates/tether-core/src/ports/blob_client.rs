//! BlobClient port - リモート blob ストレージ
//!
//! ネットワーク・リトライ・認証はこの port の実装側の責務です。
//! binding 層は open / write / commit / release しか使いません。

use async_trait::async_trait;

use crate::domain::{BlobRef, StorageError};

/// A write stream against one blob.
///
/// Bytes written here are staged out of sight; `commit` is the single point
/// at which the blob becomes readable with the new content. `release` frees
/// the stream and must be called exactly once by its owner, committed or
/// not. Releasing without a commit abandons the staged bytes.
#[async_trait]
pub trait BlobWriteStream: Send {
    async fn write(&mut self, buf: &[u8]) -> Result<(), StorageError>;

    async fn commit(&mut self) -> Result<(), StorageError>;

    fn release(&mut self);
}

/// Client for a blob storage service.
#[async_trait]
pub trait BlobClient: Send + Sync {
    /// Open a write stream against `blob`. May allocate remote resources.
    async fn open_write(&self, blob: &BlobRef) -> Result<Box<dyn BlobWriteStream>, StorageError>;

    async fn exists(&self, blob: &BlobRef) -> Result<bool, StorageError>;

    /// Committed content of `blob`, if any.
    async fn read(&self, blob: &BlobRef) -> Result<Option<Vec<u8>>, StorageError>;
}

#[async_trait]
impl<S: BlobWriteStream + ?Sized> BlobWriteStream for Box<S> {
    async fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        (**self).write(buf).await
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        (**self).commit().await
    }

    fn release(&mut self) {
        (**self).release()
    }
}
