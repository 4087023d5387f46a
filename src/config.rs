//! Client configuration, loaded from a TOML file

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::thumbnail::ThumbnailSpec;

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    /// 站点根地址
    pub base_url: String,
    pub check_path: String,
    pub publish_path: String,
    /// 作品详情页前缀，结果卡片中的 “查看旧卡片” 链接使用
    pub detail_path_prefix: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    /// 不设置则不限时
    pub request_timeout_secs: Option<u64>,
    pub list_thumbnail: ThumbnailSpec,
    pub modal_thumbnail: ThumbnailSpec,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            check_path: "/check-duplicates/".to_string(),
            publish_path: "/upload/".to_string(),
            detail_path_prefix: "/image/".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            request_timeout_secs: None,
            list_thumbnail: ThumbnailSpec::LIST,
            modal_thumbnail: ThumbnailSpec::MODAL,
        }
    }
}

impl ClientConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<ClientConfig> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::from_toml_str(&config_str)
            .with_context(|| format!("Can't load config: {}", path.display()))
    }

    pub fn from_toml_str(config_str: &str) -> anyhow::Result<ClientConfig> {
        let config: ClientConfig = toml::from_str(config_str)?;
        url::Url::parse(&config.base_url)
            .with_context(|| format!("Invalid base_url: {}", config.base_url))?;

        Ok(config)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
