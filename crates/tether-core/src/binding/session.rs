//! WriteSession - 開いたストリームのスコープ付き所有者
//!
//! blob の書き込みストリームには「commit せずに閉じる」手段がありません。
//! release は成功・失敗・キャンセルのどの経路でもちょうど一回呼ばれます。
//! commit するかどうかは所有者が決め、release だけをここで保証します。

use crate::ports::BlobWriteStream;

pub struct WriteSession<S: BlobWriteStream> {
    stream: S,
    released: bool,
}

impl<S: BlobWriteStream> WriteSession<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            released: false,
        }
    }

    pub fn stream_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Release the stream now instead of at end of scope.
    pub fn close(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.stream.release();
        }
    }
}

impl<S: BlobWriteStream> Drop for WriteSession<S> {
    fn drop(&mut self) {
        self.release_once();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BlobPath, BlobRef};
    use crate::impls::{InMemoryBlobClient, StorageCall};
    use crate::ports::BlobClient;

    fn blob() -> BlobRef {
        BlobRef::block(BlobPath::new("out", "session.txt").unwrap())
    }

    fn releases(client: &InMemoryBlobClient) -> usize {
        client.count(|c| matches!(c, StorageCall::Release(_)))
    }

    #[tokio::test]
    async fn close_releases_exactly_once() {
        let client = InMemoryBlobClient::new();
        let session = WriteSession::new(client.open_write(&blob()).await.unwrap());

        session.close();

        assert_eq!(releases(&client), 1);
    }

    #[tokio::test]
    async fn drop_releases_without_commit() {
        let client = InMemoryBlobClient::new();
        {
            let mut session = WriteSession::new(client.open_write(&blob()).await.unwrap());
            session.stream_mut().write(b"partial").await.unwrap();
        }

        assert_eq!(releases(&client), 1);
        assert_eq!(client.count(|c| matches!(c, StorageCall::Commit(_))), 0);
        assert!(!client.exists(&blob()).await.unwrap());
    }
}
