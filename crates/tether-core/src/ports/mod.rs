//! Ports - 外部コラボレーターとの境界
//!
//! 各 trait は binding 層の外側にあるもの（blob ストレージのクライアント、
//! 書き込み通知の受け手、時計、ID 生成）を表します。
//! 実装は `impls` か、ホスト側が提供します。

pub mod blob_client;
pub mod blob_written_watcher;
pub mod clock;
pub mod id_generator;
pub mod self_watch;

pub use self::blob_client::{BlobClient, BlobWriteStream};
pub use self::blob_written_watcher::BlobWrittenWatcher;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::self_watch::SelfWatch;
