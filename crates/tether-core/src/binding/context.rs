use std::fmt;
use std::sync::Arc;

use crate::domain::FunctionInstanceId;
use crate::ports::BlobWrittenWatcher;

/// Per-invocation context shared by every binder of one function execution.
#[derive(Clone)]
pub struct FunctionBindingContext {
    pub function_instance_id: FunctionInstanceId,
    pub blob_written_watcher: Arc<dyn BlobWrittenWatcher>,
}

impl FunctionBindingContext {
    pub fn new(
        function_instance_id: FunctionInstanceId,
        blob_written_watcher: Arc<dyn BlobWrittenWatcher>,
    ) -> Self {
        Self {
            function_instance_id,
            blob_written_watcher,
        }
    }
}

impl fmt::Debug for FunctionBindingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionBindingContext")
            .field("function_instance_id", &self.function_instance_id)
            .finish_non_exhaustive()
    }
}
