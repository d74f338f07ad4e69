//! BlobWrittenWatcher port - 「blob が書き込まれた」通知先
//!
//! 配送は fire-and-forget です。キューイングやリトライは実装側で行います。

use crate::domain::{BlobPath, FunctionInstanceId};

pub trait BlobWrittenWatcher: Send + Sync {
    fn notify(&self, blob: &BlobPath, function_instance_id: FunctionInstanceId);
}
