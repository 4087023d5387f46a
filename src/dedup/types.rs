use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{FileId, PendingFile, Result, UploadError};

/// 服务端签发的批次标识，对客户端是不透明的
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// 单次查重请求的本地标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckId(Uuid);

impl CheckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CheckId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 单个文件的查重结论；除 `duplicate` 以外的值都按通过处理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CheckStatus {
    Duplicate,
    Clean,
}

impl From<String> for CheckStatus {
    fn from(value: String) -> Self {
        if value == "duplicate" {
            CheckStatus::Duplicate
        } else {
            CheckStatus::Clean
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DuplicateCheckResult {
    pub filename: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default)]
    pub existing_group_id: Option<i64>,
    #[serde(default)]
    pub existing_group_title: Option<String>,
    #[serde(default)]
    pub is_video: bool,
}

impl DuplicateCheckResult {
    pub fn is_duplicate(&self) -> bool {
        self.status == CheckStatus::Duplicate
    }
}

/// `POST /check-duplicates/` 的原始响应
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CheckResponse {
    pub status: String,
    #[serde(default)]
    pub batch_id: Option<BatchId>,
    #[serde(default)]
    pub results: Vec<DuplicateCheckResult>,
    #[serde(default)]
    pub has_duplicate: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// 一次成功的查重结果
#[derive(Debug, Clone)]
pub struct UploadBatch {
    pub batch_id: BatchId,
    pub results: Vec<DuplicateCheckResult>,
    pub has_duplicate: bool,
}

impl UploadBatch {
    pub fn from_response(response: CheckResponse) -> Result<Self> {
        if response.status != "success" {
            return Err(UploadError::rejected(response.message));
        }

        let batch_id = response
            .batch_id
            .ok_or_else(|| UploadError::server_error(200, "No 'batch_id' in response"))?;

        Ok(Self {
            batch_id,
            results: response.results,
            has_duplicate: response.has_duplicate,
        })
    }

    pub fn duplicates(&self) -> impl Iterator<Item = &DuplicateCheckResult> {
        self.results.iter().filter(|r| r.is_duplicate())
    }

    pub fn duplicate_count(&self) -> usize {
        self.duplicates().count()
    }
}

/// 一批刚被接受的文件，准备提交查重
#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub check_id: CheckId,
    pub files: Vec<PendingFile>,
}

impl CheckRequest {
    pub fn new(files: Vec<PendingFile>) -> Result<Self> {
        if files.is_empty() {
            return Err(UploadError::Param("Duplicate check needs at least one file".to_string()));
        }

        Ok(Self {
            check_id: CheckId::new(),
            files,
        })
    }

    pub fn file_ids(&self) -> Vec<FileId> {
        self.files.iter().map(|f| f.id).collect()
    }
}
