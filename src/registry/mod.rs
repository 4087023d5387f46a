//! 每个上传通道的文件注册表
//!
//! 本地待上传文件与服务端已暂存文件分开保存，但共享同一条去重规则：
//! 同一通道内 (文件名, 大小) 不能重复。

mod input;

pub use input::FileInput;

use crate::core::{FileId, PendingFile, ServerStagedFile, Slot};

/// 批量添加的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddOutcome {
    /// 新接受的文件，按添加顺序
    pub accepted: Vec<FileId>,
    /// 因重复被过滤掉的数量
    pub filtered: usize,
}

#[derive(Debug, Clone)]
pub struct SlotRegistry {
    slot: Slot,
    files: Vec<PendingFile>,
    staged: Vec<ServerStagedFile>,
    input: FileInput,
}

impl SlotRegistry {
    pub fn new(slot: Slot) -> Self {
        Self {
            slot,
            files: Vec::new(),
            staged: Vec::new(),
            input: FileInput::new(slot.form_field()),
        }
    }

    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn staged(&self) -> &[ServerStagedFile] {
        &self.staged
    }

    pub fn input(&self) -> &FileInput {
        &self.input
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, id: FileId) -> Option<&PendingFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn contains(&self, name: &str, size: u64) -> bool {
        self.files.iter().any(|f| f.identity() == (name, size))
            || self.staged.iter().any(|f| f.identity() == (name, size))
    }

    /// 添加一个本地文件，重复时返回 false 且不产生任何副作用
    pub fn add(&mut self, mut file: PendingFile) -> bool {
        if self.contains(&file.name, file.size) {
            tracing::debug!(slot = ?self.slot, name = %file.name, size = file.size, "Duplicate file filtered");
            return false;
        }

        file.slot = self.slot;
        self.files.push(file);
        self.sync_input();

        true
    }

    pub fn add_many(&mut self, files: impl IntoIterator<Item = PendingFile>) -> AddOutcome {
        let mut outcome = AddOutcome::default();

        for file in files {
            let id = file.id;
            if self.add(file) {
                outcome.accepted.push(id);
            } else {
                outcome.filtered += 1;
            }
        }

        outcome
    }

    pub fn remove(&mut self, id: FileId) -> Option<PendingFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        self.remove_at(index)
    }

    /// 按本地文件序号删除 (不含服务端暂存文件)
    pub fn remove_at(&mut self, index: usize) -> Option<PendingFile> {
        if index >= self.files.len() {
            return None;
        }

        let removed = self.files.remove(index);
        self.sync_input();

        Some(removed)
    }

    /// 引入服务端暂存文件，规则与本地文件相同
    pub fn stage_server_file(&mut self, file: ServerStagedFile) -> bool {
        if self.contains(&file.name, file.size) {
            return false;
        }

        self.staged.push(file);
        true
    }

    /// 只删除客户端引用，不会请求服务端删除
    pub fn unstage(&mut self, name: &str, size: u64) -> Option<ServerStagedFile> {
        let index = self.staged.iter().position(|f| f.identity() == (name, size))?;
        Some(self.staged.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
        self.staged.clear();
        self.sync_input();
    }

    fn sync_input(&mut self) {
        self.input.assign(&self.files);
    }
}
