use crate::core::{FileId, Slot, UploadError};
use crate::dedup::{BatchId, CheckId};

/// 需要展示给用户的提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// 添加时过滤掉的同名同大小文件
    DuplicatesFiltered { count: usize },
    /// 自动查重发现重复，已在预览上标红
    DuplicatesFound,
    /// 服务端拒绝了请求
    RequestFailed { message: String },
    NetworkError,
}

impl Notice {
    /// 取消不需要提示，返回 None
    pub fn from_error(err: &UploadError) -> Option<Notice> {
        match err {
            UploadError::Cancelled => None,
            UploadError::Rejected { message } => Some(Notice::RequestFailed { message: message.clone() }),
            _ => Some(Notice::NetworkError),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::DuplicatesFiltered { count } => format!("已过滤 {} 个重复文件", count),
            Notice::DuplicatesFound => "发现重复图片，已标红".to_string(),
            Notice::RequestFailed { message } => message.clone(),
            Notice::NetworkError => "网络请求错误".to_string(),
        }
    }

    /// 错误类提示用模态框，其余用 toast
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::RequestFailed { .. } | Notice::NetworkError)
    }
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    FilesAdded {
        slot: Slot,
        accepted: Vec<FileId>,
        filtered: usize,
    },
    FileRemoved {
        slot: Slot,
        file_id: FileId,
    },
    /// 删除了服务端暂存文件
    StagedFileRemoved {
        slot: Slot,
        name: String,
    },
    ThumbnailReady {
        slot: Slot,
        file_id: FileId,
        available: bool,
    },
    CheckStarted {
        check_id: CheckId,
        files: usize,
    },
    CheckCompleted {
        check_id: CheckId,
        batch_id: BatchId,
        marked: usize,
    },
    CheckCancelled {
        check_id: CheckId,
    },
    Notice(Notice),
    Reset,
}
