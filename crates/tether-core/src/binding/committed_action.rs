//! BlobCommittedAction - commit 成功時に一度だけ呼ばれる通知
//!
//! `execute(self)` が self を消費するので、二度発火することは型で防がれます。

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{BlobPath, FunctionInstanceId};
use crate::ports::BlobWrittenWatcher;

pub struct BlobCommittedAction {
    blob: BlobPath,
    function_instance_id: FunctionInstanceId,
    watcher: Arc<dyn BlobWrittenWatcher>,
}

impl BlobCommittedAction {
    pub fn new(
        blob: BlobPath,
        function_instance_id: FunctionInstanceId,
        watcher: Arc<dyn BlobWrittenWatcher>,
    ) -> Self {
        Self {
            blob,
            function_instance_id,
            watcher,
        }
    }

    pub fn execute(self) {
        debug!(blob = %self.blob, instance = %self.function_instance_id, "notifying blob written");
        self.watcher.notify(&self.blob, self.function_instance_id);
    }
}

impl fmt::Debug for BlobCommittedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlobCommittedAction")
            .field("blob", &self.blob)
            .field("function_instance_id", &self.function_instance_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BlobWritten;
    use crate::impls::RecordingWatcher;

    #[test]
    fn execute_notifies_with_blob_and_instance() {
        let watcher = Arc::new(RecordingWatcher::new());
        let blob = BlobPath::new("out", "a.txt").unwrap();
        let id = FunctionInstanceId::from_u128(7);

        BlobCommittedAction::new(blob.clone(), id, watcher.clone()).execute();

        assert_eq!(
            watcher.notifications(),
            vec![BlobWritten {
                blob,
                function_instance_id: id,
            }]
        );
    }
}
