//! Impls - port の実装（開発用・ローカル用）

pub mod local;
pub mod memory;
pub mod watchers;

pub use self::local::LocalBlobClient;
pub use self::memory::{InMemoryBlobClient, StorageCall};
pub use self::watchers::{RecordingWatcher, TracingWatcher};
