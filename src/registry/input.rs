use crate::core::PendingFile;

/// 原生文件输入框的镜像
///
/// 浏览器不允许直接修改 `input.files`，只能整体替换。这里同样只暴露
/// 整体赋值，每次注册表变化后都要重新构建。
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    name: &'static str,
    files: Vec<PendingFile>,
}

impl FileInput {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            files: Vec::new(),
        }
    }

    /// 表单字段名
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub(crate) fn assign<'a>(&mut self, files: impl IntoIterator<Item = &'a PendingFile>) {
        // Bytes 克隆只增加引用计数
        self.files = files.into_iter().cloned().collect();
    }
}
