//! Domain events emitted by the binding layer.

use serde::{Deserialize, Serialize};

use super::blob::BlobPath;
use super::ids::FunctionInstanceId;

/// "This blob now has new content", written by this invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobWritten {
    pub blob: BlobPath,
    pub function_instance_id: FunctionInstanceId,
}
