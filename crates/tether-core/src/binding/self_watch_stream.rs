//! SelfWatchStream - 書き込みを観測するだけのデコレータ
//!
//! write はそのまま内側に流し、成功したバイト数だけ数えます。
//! 独自のバッファは持たず、成否も変えません。
//! commit が成功したときだけ committed action を発火します。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::binding::committed_action::BlobCommittedAction;
use crate::domain::{StorageError, WriteProgress};
use crate::ports::{BlobWriteStream, SelfWatch};

#[derive(Debug, Default)]
struct Counters {
    bytes_written: AtomicU64,
    committed: AtomicBool,
}

/// Shared, read-only view onto a stream's progress.
///
/// Clones observe the same counters, so a handle can be read from another
/// task while the owning binder is still writing.
#[derive(Debug, Clone, Default)]
pub struct ProgressHandle {
    counters: Arc<Counters>,
}

impl ProgressHandle {
    pub fn snapshot(&self) -> WriteProgress {
        WriteProgress {
            bytes_written: self.counters.bytes_written.load(Ordering::Acquire),
            committed: self.counters.committed.load(Ordering::Acquire),
        }
    }

    fn record_write(&self, len: usize) {
        self.counters
            .bytes_written
            .fetch_add(len as u64, Ordering::AcqRel);
    }

    fn mark_committed(&self) {
        self.counters.committed.store(true, Ordering::Release);
    }
}

impl SelfWatch for ProgressHandle {
    fn progress(&self) -> WriteProgress {
        self.snapshot()
    }
}

pub struct SelfWatchStream {
    inner: Box<dyn BlobWriteStream>,
    progress: ProgressHandle,
    committed_action: Option<BlobCommittedAction>,
}

impl SelfWatchStream {
    pub fn new(inner: Box<dyn BlobWriteStream>, committed_action: BlobCommittedAction) -> Self {
        Self {
            inner,
            progress: ProgressHandle::default(),
            committed_action: Some(committed_action),
        }
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }
}

#[async_trait]
impl BlobWriteStream for SelfWatchStream {
    async fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        self.inner.write(buf).await?;
        self.progress.record_write(buf.len());
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        self.inner.commit().await?;
        self.progress.mark_committed();
        if let Some(action) = self.committed_action.take() {
            action.execute();
        }
        Ok(())
    }

    fn release(&mut self) {
        self.inner.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlobPath, BlobRef, FunctionInstanceId};
    use crate::impls::{InMemoryBlobClient, RecordingWatcher, StorageCall};
    use crate::ports::BlobClient;

    async fn watched_stream(
        client: &InMemoryBlobClient,
        watcher: Arc<RecordingWatcher>,
    ) -> SelfWatchStream {
        let path = BlobPath::new("out", "watched.txt").unwrap();
        let raw = client.open_write(&BlobRef::block(path.clone())).await.unwrap();
        let action = BlobCommittedAction::new(path, FunctionInstanceId::from_u128(1), watcher);
        SelfWatchStream::new(raw, action)
    }

    #[tokio::test]
    async fn counts_bytes_and_passes_writes_through() {
        let client = InMemoryBlobClient::new();
        let watcher = Arc::new(RecordingWatcher::new());
        let mut stream = watched_stream(&client, watcher.clone()).await;
        let handle = stream.progress_handle();

        stream.write(b"abc").await.unwrap();
        stream.write(b"de").await.unwrap();

        assert_eq!(handle.snapshot().bytes_written, 5);
        assert!(!handle.snapshot().committed);
        assert!(watcher.notifications().is_empty());

        stream.commit().await.unwrap();

        assert_eq!(
            handle.snapshot(),
            WriteProgress {
                bytes_written: 5,
                committed: true,
            }
        );
        assert_eq!(handle.status(), "Wrote 5 bytes.");
        assert_eq!(watcher.notifications().len(), 1);
    }

    #[tokio::test]
    async fn failed_write_is_not_counted() {
        let client = InMemoryBlobClient::new();
        client.fail_writes(true);
        let mut stream = watched_stream(&client, Arc::new(RecordingWatcher::new())).await;

        assert!(stream.write(b"abc").await.is_err());
        assert_eq!(stream.progress_handle().snapshot().bytes_written, 0);
    }

    #[tokio::test]
    async fn failed_commit_does_not_fire_action() {
        let client = InMemoryBlobClient::new();
        client.fail_commit(true);
        let watcher = Arc::new(RecordingWatcher::new());
        let mut stream = watched_stream(&client, watcher.clone()).await;

        stream.write(b"abc").await.unwrap();
        assert!(stream.commit().await.is_err());

        assert!(watcher.notifications().is_empty());
        assert!(!stream.progress_handle().snapshot().committed);
    }

    #[tokio::test]
    async fn release_is_forwarded() {
        let client = InMemoryBlobClient::new();
        let mut stream = watched_stream(&client, Arc::new(RecordingWatcher::new())).await;

        stream.release();

        assert_eq!(client.count(|c| matches!(c, StorageCall::Release(_))), 1);
    }
}
