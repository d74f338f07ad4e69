//! Binding - パラメータと blob を結びつける層
//!
//! # 二層構造
//! - **Provider**: パラメータの形を見て、この binding が使えるか判定する
//! - **Binding / ValueBinder**: invocation ごとにストリームを開き、値を一度だけ受け取って永続化する
//!
//! 判定は I/O の前に、対象の種類チェックはストリームを開く前に行います。

pub mod committed_action;
pub mod context;
pub mod out_text;
pub mod self_watch_stream;
pub mod session;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AccessMode, BindingError, BlobRef, ParameterDescriptor, ValueType};
use crate::ports::SelfWatch;

pub use self::committed_action::BlobCommittedAction;
pub use self::context::FunctionBindingContext;
pub use self::out_text::{OutTextArgumentBindingProvider, TextValueBinder, WRITE_BUFFER_SIZE};
pub use self::self_watch_stream::{ProgressHandle, SelfWatchStream};
pub use self::session::WriteSession;

/// Lifecycle of a value binder.
///
/// `Unassigned` is the only state that accepts a value. `Committed` and
/// `Abandoned` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinderState {
    Unassigned,
    Committed,
    Abandoned,
}

/// Decides whether a parameter can be bound to a blob.
pub trait BlobArgumentBindingProvider: Send + Sync {
    /// A parameter of the wrong shape is `NotApplicable`, not an error, so
    /// other providers may be tried. An incompatible explicit access mode is
    /// an error.
    fn try_create(
        &self,
        parameter: &ParameterDescriptor,
        access: Option<AccessMode>,
    ) -> Result<BindingMatch, BindingError>;
}

pub enum BindingMatch {
    Matched(Box<dyn BlobArgumentBinding>),
    NotApplicable,
}

impl BindingMatch {
    pub fn is_match(&self) -> bool {
        matches!(self, BindingMatch::Matched(_))
    }

    pub fn into_binding(self) -> Option<Box<dyn BlobArgumentBinding>> {
        match self {
            BindingMatch::Matched(binding) => Some(binding),
            BindingMatch::NotApplicable => None,
        }
    }
}

impl fmt::Debug for BindingMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingMatch::Matched(binding) => f
                .debug_struct("Matched")
                .field("access", &binding.access())
                .field("value_type", &binding.value_type())
                .finish(),
            BindingMatch::NotApplicable => f.write_str("NotApplicable"),
        }
    }
}

/// A validated binding strategy. Holds configuration only; every call to
/// `bind` creates a fresh write session.
#[async_trait]
pub trait BlobArgumentBinding: Send + Sync {
    fn access(&self) -> AccessMode;

    fn value_type(&self) -> ValueType;

    async fn bind(
        &self,
        blob: &BlobRef,
        context: &FunctionBindingContext,
    ) -> Result<Box<dyn ValueBinder>, BindingError>;
}

/// Object-safe, per-invocation binder used by the invocation framework.
///
/// Values cross this seam as `serde_json::Value`; typed binders expose their
/// own strongly-typed `assign`.
#[async_trait]
pub trait ValueBinder: Send {
    fn value_type(&self) -> ValueType;

    /// Output binders have nothing to read back.
    fn get_value(&self) -> Option<serde_json::Value>;

    async fn set_value(&mut self, value: serde_json::Value) -> Result<(), BindingError>;

    /// Stable identity of the bound target for invocation logs.
    fn to_invoke_string(&self) -> String;

    fn watcher(&self) -> Option<Arc<dyn SelfWatch>>;

    fn state(&self) -> BinderState;
}
