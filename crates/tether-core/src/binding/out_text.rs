//! Output text binding: an `out` text parameter written to a block blob.
//!
//! The value is UTF-8 encoded (no byte-order mark), fed to the stream through
//! a fixed-size buffering stage, then committed. The blob becomes visible
//! only at commit; a binder that is dropped without a value releases its
//! stream and leaves the blob untouched.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::{
    BinderState, BindingMatch, BlobArgumentBinding, BlobArgumentBindingProvider, BlobCommittedAction,
    FunctionBindingContext, ProgressHandle, SelfWatchStream, ValueBinder, WriteSession,
};
use crate::domain::{
    AccessMode, BindingError, BlobPath, BlobRef, ParameterDescriptor, StorageError, ValueType,
    WriteProgress,
};
use crate::ports::{BlobClient, BlobWriteStream, SelfWatch};

/// Size of the buffering stage between the encoder and the blob stream.
pub const WRITE_BUFFER_SIZE: usize = 1024;

pub struct OutTextArgumentBindingProvider {
    client: Arc<dyn BlobClient>,
}

impl OutTextArgumentBindingProvider {
    pub fn new(client: Arc<dyn BlobClient>) -> Self {
        Self { client }
    }
}

impl BlobArgumentBindingProvider for OutTextArgumentBindingProvider {
    fn try_create(
        &self,
        parameter: &ParameterDescriptor,
        access: Option<AccessMode>,
    ) -> Result<BindingMatch, BindingError> {
        if !parameter.is_out_text() {
            debug!(parameter = %parameter.name, "not an out text parameter");
            return Ok(BindingMatch::NotApplicable);
        }

        if let Some(access) = access
            && access != AccessMode::Write
        {
            return Err(BindingError::Configuration { access });
        }

        debug!(parameter = %parameter.name, "matched out text binding");
        Ok(BindingMatch::Matched(Box::new(OutTextArgumentBinding {
            client: Arc::clone(&self.client),
        })))
    }
}

struct OutTextArgumentBinding {
    client: Arc<dyn BlobClient>,
}

#[async_trait]
impl BlobArgumentBinding for OutTextArgumentBinding {
    fn access(&self) -> AccessMode {
        AccessMode::Write
    }

    fn value_type(&self) -> ValueType {
        ValueType::Text
    }

    #[instrument(skip_all, fields(blob = %blob.path, instance = %context.function_instance_id))]
    async fn bind(
        &self,
        blob: &BlobRef,
        context: &FunctionBindingContext,
    ) -> Result<Box<dyn ValueBinder>, BindingError> {
        if !blob.supports_streaming_writes() {
            return Err(BindingError::UnsupportedTarget {
                path: blob.path.clone(),
                kind: blob.kind,
            });
        }

        let raw = self.client.open_write(blob).await?;
        let committed_action = BlobCommittedAction::new(
            blob.path.clone(),
            context.function_instance_id,
            Arc::clone(&context.blob_written_watcher),
        );
        let stream = SelfWatchStream::new(raw, committed_action);
        debug!("opened write stream");

        Ok(Box::new(TextValueBinder::new(blob.path.clone(), stream)))
    }
}

/// Accepts one text value and persists it to the bound blob.
pub struct TextValueBinder {
    blob: BlobPath,
    progress: ProgressHandle,
    session: Option<WriteSession<SelfWatchStream>>,
    state: BinderState,
}

impl TextValueBinder {
    pub fn new(blob: BlobPath, stream: SelfWatchStream) -> Self {
        Self {
            blob,
            progress: stream.progress_handle(),
            session: Some(WriteSession::new(stream)),
            state: BinderState::Unassigned,
        }
    }

    /// Write `text`, commit, and release the stream.
    ///
    /// The stream is released on every path. A failure leaves the binder
    /// `Abandoned`; a second call fails with `AlreadyAssigned` without
    /// touching storage.
    pub async fn assign(&mut self, text: &str) -> Result<(), BindingError> {
        let Some(mut session) = self.session.take() else {
            return Err(BindingError::AlreadyAssigned);
        };
        // stays Abandoned if this future is dropped before the commit lands
        self.state = BinderState::Abandoned;

        let result = write_and_commit(session.stream_mut(), text).await;
        session.close();

        match result {
            Ok(()) => {
                self.state = BinderState::Committed;
                info!(blob = %self.blob, bytes = self.progress.snapshot().bytes_written, "committed blob");
                Ok(())
            }
            Err(e) => {
                warn!(blob = %self.blob, error = %e, "blob write abandoned");
                Err(e.into())
            }
        }
    }

    pub fn describe(&self) -> String {
        self.blob.to_string()
    }

    pub fn progress(&self) -> WriteProgress {
        self.progress.snapshot()
    }

    pub fn progress_handle(&self) -> ProgressHandle {
        self.progress.clone()
    }

    pub fn state(&self) -> BinderState {
        self.state
    }
}

impl Drop for TextValueBinder {
    fn drop(&mut self) {
        if self.state == BinderState::Unassigned {
            debug!(blob = %self.blob, "no value assigned; releasing stream without commit");
        }
    }
}

async fn write_and_commit<S: BlobWriteStream + ?Sized>(
    stream: &mut S,
    text: &str,
) -> Result<(), StorageError> {
    for chunk in text.as_bytes().chunks(WRITE_BUFFER_SIZE) {
        stream.write(chunk).await?;
    }
    stream.commit().await
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl ValueBinder for TextValueBinder {
    fn value_type(&self) -> ValueType {
        ValueType::Text
    }

    fn get_value(&self) -> Option<Value> {
        None
    }

    async fn set_value(&mut self, value: Value) -> Result<(), BindingError> {
        match value {
            Value::String(text) => self.assign(&text).await,
            other => Err(BindingError::ValueType {
                expected: ValueType::Text,
                actual: json_kind(&other).to_string(),
            }),
        }
    }

    fn to_invoke_string(&self) -> String {
        self.describe()
    }

    fn watcher(&self) -> Option<Arc<dyn SelfWatch>> {
        Some(Arc::new(self.progress.clone()))
    }

    fn state(&self) -> BinderState {
        self.state
    }
}
