use serde::{Deserialize, Serialize};

use crate::binding::{BinderState, ValueBinder};
use crate::ports::SelfWatch;

/// Snapshot of one binder for invocation logs and status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinderStatus {
    pub target: String,
    pub state: BinderState,
    pub bytes_written: u64,
    pub committed: bool,
    pub status: String,
}

impl BinderStatus {
    pub fn of(binder: &dyn ValueBinder) -> Self {
        let progress = binder.watcher().map(|w| w.progress()).unwrap_or_default();
        Self {
            target: binder.to_invoke_string(),
            state: binder.state(),
            bytes_written: progress.bytes_written,
            committed: progress.committed,
            status: progress.to_string(),
        }
    }
}
