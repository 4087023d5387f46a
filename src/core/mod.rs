mod types;
mod errors;

pub use types::{FileId, MediaKind, PendingFile, ServerStagedFile, Slot};
pub use errors::{Result, UploadError, CHECK_REJECTED_FALLBACK};
