//! 查重客户端
//!
//! 把新加入的文件打包提交到服务端查重接口，并把按文件名返回的结果
//! 对应回本地文件。哈希计算与比对全部在服务端完成。

mod client;
mod correlate;
mod csrf;
mod types;

pub use client::{DuplicateCheckApi, HttpGalleryClient, PublishReceipt, CHECK_FIELD};
pub use correlate::{correlate, Correlation};
pub use csrf::CsrfToken;
pub use types::{
    BatchId, CheckId, CheckRequest, CheckResponse, CheckStatus, DuplicateCheckResult, UploadBatch,
};

pub(crate) use client::file_part;
