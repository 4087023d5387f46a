use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ClientConfig;
use crate::core::{PendingFile, Result, UploadError};
use crate::session::PublishForm;
use super::csrf::CsrfToken;
use super::types::{CheckRequest, CheckResponse, UploadBatch};

/// 查重请求中文件使用的表单字段 (可重复)
pub const CHECK_FIELD: &str = "images";

/// 服务端查重接口
#[async_trait]
pub trait DuplicateCheckApi: Send + Sync {
    /// 提交一批文件；令牌被取消时返回 `UploadError::Cancelled`
    async fn check_duplicates(&self, request: &CheckRequest, cancel: CancellationToken) -> Result<UploadBatch>;
}

/// 发布请求的结果
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub status_code: u16,
    /// 跟随重定向之后的地址
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct HttpGalleryClient {
    client: Client,
    base_url: Url,
    config: ClientConfig,
    csrf: Option<CsrfToken>,
}

impl HttpGalleryClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url,
            config,
            csrf: None,
        })
    }

    pub fn with_csrf_token(mut self, token: CsrfToken) -> Self {
        self.csrf = Some(token);
        self
    }

    /// 从页面的 `Cookie` 头读取 CSRF 令牌
    pub fn with_cookie_header(mut self, header: &str) -> Self {
        self.csrf = CsrfToken::from_cookie_header(header, &self.config.csrf_cookie);
        if self.csrf.is_none() {
            tracing::warn!(cookie = %self.config.csrf_cookie, "No CSRF cookie found");
        }
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn post(&self, url: Url) -> reqwest::RequestBuilder {
        let request = self.client.post(url);
        match &self.csrf {
            Some(token) => request.header(self.config.csrf_header.as_str(), token.as_str()),
            None => request,
        }
    }

    async fn send_check(&self, request: &CheckRequest) -> Result<UploadBatch> {
        let url = self.endpoint(&self.config.check_path)?;

        let mut form = Form::new();
        for file in &request.files {
            form = form.part(CHECK_FIELD, file_part(file)?);
        }

        tracing::debug!(check_id = %request.check_id, files = request.files.len(), %url, "Sending duplicate check");

        let response = self.post(url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // 服务端出错时也可能返回 JSON 格式的 message
        let parsed: CheckResponse = serde_json::from_str(&body).map_err(|err| {
            if status.is_success() {
                UploadError::Decode(err)
            } else {
                UploadError::server_error(status.as_u16(), format!("Duplicate check failed with status {}", status))
            }
        })?;

        UploadBatch::from_response(parsed)
    }

    /// 提交发布表单，只在用户确认后由调用方触发
    pub async fn publish(&self, form: PublishForm) -> Result<PublishReceipt> {
        let url = form.url(&self.endpoint(&self.config.publish_path)?);
        let multipart = form.into_multipart()?;

        let response = self.post(url).multipart(multipart).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::server_error(
                status.as_u16(),
                format!("Publish failed with status {}", status),
            ));
        }

        Ok(PublishReceipt {
            status_code: status.as_u16(),
            location: response.url().to_string(),
        })
    }
}

#[async_trait]
impl DuplicateCheckApi for HttpGalleryClient {
    async fn check_duplicates(&self, request: &CheckRequest, cancel: CancellationToken) -> Result<UploadBatch> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(check_id = %request.check_id, "Duplicate check cancelled");
                Err(UploadError::Cancelled)
            }
            result = self.send_check(request) => result,
        }
    }
}

pub(crate) fn file_part(file: &PendingFile) -> Result<Part> {
    let part = Part::bytes(file.data.to_vec()).file_name(file.name.clone());
    if file.mime.is_empty() {
        return Ok(part);
    }

    Ok(part.mime_str(&file.mime)?)
}
