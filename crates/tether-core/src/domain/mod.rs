//! Domain model (identities, parameter shapes, progress, errors).

pub mod access;
pub mod blob;
pub mod errors;
pub mod events;
pub mod ids;
pub mod parameter;
pub mod progress;

pub use self::access::AccessMode;
pub use self::blob::{BlobKind, BlobPath, BlobPathError, BlobRef};
pub use self::errors::{BindingError, ErrorKind, StorageError};
pub use self::events::BlobWritten;
pub use self::ids::FunctionInstanceId;
pub use self::parameter::{ParameterDescriptor, ValueType};
pub use self::progress::WriteProgress;
