//! 可见的预览列表
//!
//! 本地文件与服务端暂存文件交错显示在同一个列表里，但注册表只按本地
//! 文件计数，所以按可见位置删除时必须先过滤掉暂存节点。

use crate::core::{FileId, MediaKind, PendingFile, ServerStagedFile};
use crate::thumbnail::Thumbnail;

/// 重复标记上显示的文字
pub const DUPLICATE_LABEL: &str = "已存在";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOrigin {
    Local(FileId),
    ServerStaged { name: String, size: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewContent {
    /// 缩略图生成中
    Loading,
    Ready(Thumbnail),
    /// 非图片或无法解码
    Unavailable,
    VideoBadge,
    /// 服务端已有的文件，直接使用其 URL
    Remote { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateBadge {
    pub group_title: Option<String>,
}

impl DuplicateBadge {
    pub fn label(&self) -> &'static str {
        DUPLICATE_LABEL
    }

    pub fn tooltip(&self) -> String {
        match &self.group_title {
            Some(title) => format!("系统中已存在该图 (位于: {})", title),
            None => "系统中已存在该图".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreviewNode {
    pub origin: NodeOrigin,
    /// 创建时写入的文件名标记
    pub filename: String,
    pub kind: MediaKind,
    pub content: PreviewContent,
    pub duplicate: Option<DuplicateBadge>,
}

impl PreviewNode {
    pub fn file_id(&self) -> Option<FileId> {
        match self.origin {
            NodeOrigin::Local(id) => Some(id),
            NodeOrigin::ServerStaged { .. } => None,
        }
    }

    pub fn is_server_staged(&self) -> bool {
        matches!(self.origin, NodeOrigin::ServerStaged { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        self.duplicate.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PreviewBoard {
    nodes: Vec<PreviewNode>,
}

impl PreviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[PreviewNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: FileId) -> Option<&PreviewNode> {
        self.nodes.iter().find(|n| n.file_id() == Some(id))
    }

    pub fn push_local(&mut self, file: &PendingFile) {
        self.nodes.push(PreviewNode {
            origin: NodeOrigin::Local(file.id),
            filename: file.name.clone(),
            kind: file.kind(),
            content: PreviewContent::Loading,
            duplicate: None,
        });
    }

    pub fn push_staged(&mut self, file: &ServerStagedFile) {
        self.nodes.push(PreviewNode {
            origin: NodeOrigin::ServerStaged {
                name: file.name.clone(),
                size: file.size,
            },
            filename: file.name.clone(),
            kind: MediaKind::Image,
            content: PreviewContent::Remote { url: file.url.clone() },
            duplicate: None,
        });
    }

    /// 缩略图完成后挂到对应节点；节点已被删除时返回 false
    pub fn attach_thumbnail(&mut self, id: FileId, thumbnail: Option<Thumbnail>) -> bool {
        let Some(node) = self.find_mut(id) else {
            return false;
        };

        node.content = match thumbnail {
            Some(thumbnail) => PreviewContent::Ready(thumbnail),
            None if node.kind == MediaKind::Video => PreviewContent::VideoBadge,
            None => PreviewContent::Unavailable,
        };

        true
    }

    /// 标记为重复，重复调用不会叠加标记
    pub fn mark_duplicate(&mut self, id: FileId, group_title: Option<&str>) -> bool {
        let Some(node) = self.find_mut(id) else {
            return false;
        };

        if node.duplicate.is_none() {
            node.duplicate = Some(DuplicateBadge {
                group_title: group_title.map(str::to_string),
            });
        }

        true
    }

    pub fn duplicate_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_duplicate()).count()
    }

    /// 可见位置 -> 注册表中的本地序号；暂存节点返回 None
    pub fn local_index_of(&self, visible_index: usize) -> Option<usize> {
        let node = self.nodes.get(visible_index)?;
        if node.is_server_staged() {
            return None;
        }

        Some(
            self.nodes[..visible_index]
                .iter()
                .filter(|n| !n.is_server_staged())
                .count(),
        )
    }

    pub fn node_at(&self, visible_index: usize) -> Option<&PreviewNode> {
        self.nodes.get(visible_index)
    }

    pub fn remove(&mut self, id: FileId) -> Option<PreviewNode> {
        let index = self.nodes.iter().position(|n| n.file_id() == Some(id))?;
        Some(self.nodes.remove(index))
    }

    pub fn remove_at(&mut self, visible_index: usize) -> Option<PreviewNode> {
        if visible_index >= self.nodes.len() {
            return None;
        }

        Some(self.nodes.remove(visible_index))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn find_mut(&mut self, id: FileId) -> Option<&mut PreviewNode> {
        self.nodes.iter_mut().find(|n| n.file_id() == Some(id))
    }
}
