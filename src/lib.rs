pub mod core;
pub mod config;
pub mod registry;
pub mod preview;
pub mod thumbnail;
pub mod dedup;
pub mod reconcile;
pub mod session;

// 重新导出核心类型
pub use crate::core::{
    FileId,
    MediaKind,
    PendingFile,
    ServerStagedFile,
    Slot,
    UploadError,
    Result,
};

pub use config::ClientConfig;
pub use dedup::{
    BatchId,
    CsrfToken,
    DuplicateCheckApi,
    DuplicateCheckResult,
    HttpGalleryClient,
    UploadBatch,
};
pub use reconcile::{NextAction, ReconciliationView, Routes};
pub use session::{CheckOutcome, LibraryCheck, Notice, SessionEvent, UploadSession};
pub use thumbnail::{Thumbnail, ThumbnailGenerator, ThumbnailSpec};
