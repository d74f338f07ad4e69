//! BlobWrittenWatcher の実装

use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::domain::{BlobPath, BlobWritten, FunctionInstanceId};
use crate::ports::BlobWrittenWatcher;

/// Collects every notification in arrival order.
#[derive(Debug, Default)]
pub struct RecordingWatcher {
    notifications: Mutex<Vec<BlobWritten>>,
}

impl RecordingWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<BlobWritten> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl BlobWrittenWatcher for RecordingWatcher {
    fn notify(&self, blob: &BlobPath, function_instance_id: FunctionInstanceId) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(BlobWritten {
                blob: blob.clone(),
                function_instance_id,
            });
    }
}

/// Logs each notification and drops it.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingWatcher;

impl BlobWrittenWatcher for TracingWatcher {
    fn notify(&self, blob: &BlobPath, function_instance_id: FunctionInstanceId) {
        info!(blob = %blob, instance = %function_instance_id, "blob written");
    }
}
