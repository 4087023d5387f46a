use thiserror::Error;

/// 查重请求被服务端拒绝时的默认提示
pub const CHECK_REJECTED_FALLBACK: &str = "查重请求失败";

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("HTTP Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Server error: status code {status_code}, message: {message}")]
    Server {
        status_code: u16,
        message: String,
    },

    #[error("Request rejected: {message}")]
    Rejected {
        message: String,
    },

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Param error: {0}")]
    Param(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: String,
        to: String,
    },

    #[error("Batch already checked: {0}")]
    BatchReused(String),

    #[error("Request was cancelled")]
    Cancelled,
}

impl UploadError {
    pub fn server_error(status_code: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status_code,
            message: message.into(),
        }
    }

    /// 服务端返回 `status != success`，没有消息时使用默认提示
    pub fn rejected(message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| CHECK_REJECTED_FALLBACK.to_string());

        Self::Rejected { message }
    }

    /// 网络或解析失败 (对用户统一显示为网络错误)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            UploadError::Http(_) | UploadError::Decode(_) | UploadError::Server { .. }
        )
    }
}

/// Error alias
pub type Result<T, E = UploadError> = std::result::Result<T, E>;
