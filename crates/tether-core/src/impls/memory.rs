//! InMemoryBlobClient - 開発・テスト用の blob ストレージ
//!
//! # 実装詳細
//! - commit 済みの blob だけを HashMap に保持（書き込み途中の内容は見えない）
//! - すべての呼び出しを journal に記録（順序の検証用）
//! - open / write / commit の失敗を注入できる

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{BlobPath, BlobRef, StorageError};
use crate::ports::{BlobClient, BlobWriteStream};

/// One call observed by the in-memory client, keyed by `container/name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageCall {
    Open(String),
    Write(Vec<u8>),
    Commit(String),
    Release(String),
}

#[derive(Debug, Default)]
struct Faults {
    open: bool,
    writes: bool,
    commit: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    blobs: HashMap<String, Vec<u8>>,
    journal: Vec<StorageCall>,
    faults: Faults,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryBlobClient {
    state: Arc<Mutex<MemoryState>>,
}

fn lock(state: &Mutex<MemoryState>) -> MutexGuard<'_, MemoryState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryBlobClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed committed content, bypassing the journal.
    pub fn put(&self, path: &BlobPath, content: Vec<u8>) {
        lock(&self.state).blobs.insert(path.to_string(), content);
    }

    pub fn fail_open(&self, fail: bool) {
        lock(&self.state).faults.open = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        lock(&self.state).faults.writes = fail;
    }

    pub fn fail_commit(&self, fail: bool) {
        lock(&self.state).faults.commit = fail;
    }

    pub fn journal(&self) -> Vec<StorageCall> {
        lock(&self.state).journal.clone()
    }

    pub fn count(&self, pred: impl Fn(&StorageCall) -> bool) -> usize {
        lock(&self.state).journal.iter().filter(|c| pred(*c)).count()
    }

    pub fn blob_count(&self) -> usize {
        lock(&self.state).blobs.len()
    }
}

#[async_trait]
impl BlobClient for InMemoryBlobClient {
    async fn open_write(&self, blob: &BlobRef) -> Result<Box<dyn BlobWriteStream>, StorageError> {
        let key = blob.path.to_string();
        let mut state = lock(&self.state);
        state.journal.push(StorageCall::Open(key.clone()));
        if state.faults.open {
            return Err(StorageError::Unavailable(format!("open failed for {key}")));
        }
        debug!(blob = %key, "memory: opened write stream");

        Ok(Box::new(MemoryWriteStream {
            key,
            staged: Vec::new(),
            state: Arc::clone(&self.state),
        }))
    }

    async fn exists(&self, blob: &BlobRef) -> Result<bool, StorageError> {
        Ok(lock(&self.state).blobs.contains_key(&blob.path.to_string()))
    }

    async fn read(&self, blob: &BlobRef) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(lock(&self.state).blobs.get(&blob.path.to_string()).cloned())
    }
}

struct MemoryWriteStream {
    key: String,
    staged: Vec<u8>,
    state: Arc<Mutex<MemoryState>>,
}

#[async_trait]
impl BlobWriteStream for MemoryWriteStream {
    async fn write(&mut self, buf: &[u8]) -> Result<(), StorageError> {
        let mut state = lock(&self.state);
        state.journal.push(StorageCall::Write(buf.to_vec()));
        if state.faults.writes {
            return Err(StorageError::Unavailable(format!("write failed for {}", self.key)));
        }
        self.staged.extend_from_slice(buf);
        Ok(())
    }

    async fn commit(&mut self) -> Result<(), StorageError> {
        let mut state = lock(&self.state);
        state.journal.push(StorageCall::Commit(self.key.clone()));
        if state.faults.commit {
            return Err(StorageError::Unavailable(format!("commit failed for {}", self.key)));
        }
        state.blobs.insert(self.key.clone(), std::mem::take(&mut self.staged));
        Ok(())
    }

    fn release(&mut self) {
        lock(&self.state)
            .journal
            .push(StorageCall::Release(self.key.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blob() -> BlobRef {
        BlobRef::block(BlobPath::new("c", "n").unwrap())
    }

    #[tokio::test]
    async fn staged_bytes_are_invisible_until_commit() {
        let client = InMemoryBlobClient::new();
        let mut stream = client.open_write(&blob()).await.unwrap();

        stream.write(b"abc").await.unwrap();
        assert!(!client.exists(&blob()).await.unwrap());

        stream.commit().await.unwrap();
        stream.release();
        assert_eq!(client.read(&blob()).await.unwrap(), Some(b"abc".to_vec()));
        assert_eq!(client.blob_count(), 1);
    }

    #[tokio::test]
    async fn open_fault_is_journaled() {
        let client = InMemoryBlobClient::new();
        client.fail_open(true);

        assert!(client.open_write(&blob()).await.is_err());
        assert_eq!(client.journal(), vec![StorageCall::Open("c/n".to_string())]);
    }

    #[tokio::test]
    async fn faults_can_be_cleared() {
        let client = InMemoryBlobClient::new();
        client.fail_writes(true);
        client.fail_writes(false);
        let mut stream = client.open_write(&blob()).await.unwrap();

        stream.write(b"ok").await.unwrap();
    }
}
