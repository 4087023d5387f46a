use reqwest::multipart::Form;
use url::Url;

use crate::core::{PendingFile, Result};
use crate::dedup::{file_part, BatchId};

/// 服务端暂存文件在发布表单中的隐藏字段
pub const SERVER_FILES_FIELD: &str = "server_files";

/// 发布表单
///
/// 本地文件按所属通道的字段名提交，服务端暂存文件只提交文件名，
/// 由服务端通过 batch_id 找回。
#[derive(Debug, Clone, Default)]
pub struct PublishForm {
    batch_id: Option<BatchId>,
    fields: Vec<(String, String)>,
    files: Vec<PendingFile>,
    server_files: Vec<String>,
}

impl PublishForm {
    pub fn new(batch_id: Option<BatchId>) -> Self {
        Self {
            batch_id,
            ..Default::default()
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub(crate) fn push_file(&mut self, file: PendingFile) {
        self.files.push(file);
    }

    pub(crate) fn push_server_file(&mut self, name: impl Into<String>) {
        self.server_files.push(name.into());
    }

    pub fn batch_id(&self) -> Option<&BatchId> {
        self.batch_id.as_ref()
    }

    pub fn files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn server_files(&self) -> &[String] {
        &self.server_files
    }

    pub fn url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        if let Some(batch_id) = &self.batch_id {
            url.query_pairs_mut().append_pair("batch_id", batch_id.as_str());
        }
        url
    }

    pub fn into_multipart(self) -> Result<Form> {
        let mut form = Form::new();

        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for name in self.server_files {
            form = form.text(SERVER_FILES_FIELD, name);
        }
        for file in &self.files {
            form = form.part(file.slot.form_field(), file_part(file)?);
        }

        Ok(form)
    }
}
