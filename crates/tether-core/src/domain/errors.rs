//! Errors - エラー型と分類
//!
//! 検出タイミングの早い順に並んでいます:
//! match（設定ミス）→ bind（対象の種類）→ assign（ストレージ I/O）

use thiserror::Error;

use super::access::AccessMode;
use super::blob::{BlobKind, BlobPath};
use super::parameter::ValueType;

/// Failures reported by the storage client collaborator.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("blob not found: {0}")]
    NotFound(BlobPath),

    #[error("storage i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage rejected the request: {0}")]
    Rejected(String),
}

/// ErrorKind は運用上の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad binding configuration; caught before any I/O.
    Configuration,
    /// The target object cannot take this binding; caught before opening a stream.
    UnsupportedTarget,
    /// Opening, writing or committing the stream failed.
    StorageIo,
    /// The invocation framework misused the binder.
    Usage,
}

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("Cannot bind blob out string using access {access}.")]
    Configuration { access: AccessMode },

    #[error("Cannot bind a {kind} using an out string: {path}")]
    UnsupportedTarget { path: BlobPath, kind: BlobKind },

    #[error(transparent)]
    StorageIo(#[from] StorageError),

    #[error("value has already been assigned to this binder")]
    AlreadyAssigned,

    #[error("expected a {expected} value, got {actual}")]
    ValueType { expected: ValueType, actual: String },
}

impl BindingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BindingError::Configuration { .. } => ErrorKind::Configuration,
            BindingError::UnsupportedTarget { .. } => ErrorKind::UnsupportedTarget,
            BindingError::StorageIo(_) => ErrorKind::StorageIo,
            BindingError::AlreadyAssigned | BindingError::ValueType { .. } => ErrorKind::Usage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_the_access_mode() {
        let err = BindingError::Configuration {
            access: AccessMode::ReadWrite,
        };
        assert_eq!(err.to_string(), "Cannot bind blob out string using access ReadWrite.");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn storage_errors_surface_verbatim() {
        let err: BindingError = StorageError::Unavailable("503".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::StorageIo);
        assert_eq!(err.to_string(), "storage unavailable: 503");
    }
}
