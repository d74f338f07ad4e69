//! Target identity of a blob binding.
//!
//! A blob is addressed by `container/name`. The name may itself contain `/`
//! (virtual directories); the container may not.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a `container/name` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlobPathError {
    #[error("blob path '{0}' must have the form container/name")]
    MissingSeparator(String),

    #[error("blob path has an empty container")]
    EmptyContainer,

    #[error("blob path has an empty name")]
    EmptyName,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlobPath {
    container: String,
    name: String,
}

impl BlobPath {
    pub fn new(container: impl Into<String>, name: impl Into<String>) -> Result<Self, BlobPathError> {
        let container = container.into();
        let name = name.into();
        if container.is_empty() {
            return Err(BlobPathError::EmptyContainer);
        }
        if name.is_empty() {
            return Err(BlobPathError::EmptyName);
        }
        Ok(Self { container, name })
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for BlobPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.container, self.name)
    }
}

impl FromStr for BlobPath {
    type Err = BlobPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (container, name) = s
            .split_once('/')
            .ok_or_else(|| BlobPathError::MissingSeparator(s.to_string()))?;
        Self::new(container, name)
    }
}

/// Storage layout of a blob.
///
/// Block blobs are assembled from streamed blocks and become visible on
/// commit. Page blobs are fixed-layout random-access objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobKind {
    Block,
    Page,
}

impl fmt::Display for BlobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobKind::Block => f.write_str("block blob"),
            BlobKind::Page => f.write_str("page blob"),
        }
    }
}

/// A specific remote object: where it lives and what kind it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobRef {
    pub path: BlobPath,
    pub kind: BlobKind,
}

impl BlobRef {
    pub fn block(path: BlobPath) -> Self {
        Self {
            path,
            kind: BlobKind::Block,
        }
    }

    pub fn page(path: BlobPath) -> Self {
        Self {
            path,
            kind: BlobKind::Page,
        }
    }

    pub fn supports_streaming_writes(&self) -> bool {
        self.kind == BlobKind::Block
    }
}
