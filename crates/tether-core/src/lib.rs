//! tether-core
//!
//! Binds function parameters to blob storage.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, access, parameter, blob, progress, errors, events）
//! - **ports**: 外部コラボレーター（BlobClient, BlobWriteStream, BlobWrittenWatcher, SelfWatch, Clock, IdGenerator）
//! - **binding**: out text binding（provider → binding → value binder）
//! - **impls**: 実装（InMemoryBlobClient, LocalBlobClient, watchers）
//! - **config**: ストレージ backend の設定
//! - **observability**: binder の状態ビュー

pub mod binding;
pub mod config;
pub mod domain;
pub mod impls;
pub mod observability;
pub mod ports;
