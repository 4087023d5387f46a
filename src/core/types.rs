use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 待上传文件的唯一标识，在文件被选择时生成
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 上传通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Slot {
    /// 生成图
    Primary,
    /// 参考图
    Reference,
}

impl Slot {
    /// 发布表单中对应的字段名
    pub fn form_field(&self) -> &'static str {
        match self {
            Slot::Primary => "upload_images",
            Slot::Reference => "upload_references",
        }
    }
}

/// 根据声明的 MIME 类型划分的媒体种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum MediaKind {
    Image,
    Video,
    Other,
}

impl MediaKind {
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else {
            MediaKind::Other
        }
    }
}

/// 用户选择或拖入、尚未提交的文件
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub id: FileId,
    pub name: String,
    pub size: u64,
    /// 浏览器声明的类型，例如 `image/png`
    pub mime: String,
    pub data: Bytes,
    pub slot: Slot,
}

impl PendingFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, data: impl Into<Bytes>, slot: Slot) -> Self {
        let data = data.into();

        Self {
            id: FileId::new(),
            name: name.into(),
            size: data.len() as u64,
            mime: mime.into(),
            data,
            slot,
        }
    }

    /// 去重用的身份 (文件名, 大小)
    pub fn identity(&self) -> (&str, u64) {
        (&self.name, self.size)
    }

    pub fn kind(&self) -> MediaKind {
        MediaKind::from_mime(&self.mime)
    }
}

/// 服务端已暂存的文件 (例如上一次查重时上传的临时文件)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerStagedFile {
    pub name: String,
    pub size: u64,
    pub url: String,
}

impl ServerStagedFile {
    pub fn identity(&self) -> (&str, u64) {
        (&self.name, self.size)
    }
}
