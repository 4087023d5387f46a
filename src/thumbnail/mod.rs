//! 预览缩略图生成
//!
//! 只处理声明为 `image/*` 的文件，按比例缩小后重新编码为 JPEG。
//! 任何失败 (非图片、解码失败) 都统一返回 `None`，由调用方显示占位。

use std::io::Cursor;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use bytes::Bytes;
use futures::future::join_all;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{ImageError, ImageReader};
use serde::{Deserialize, Serialize};

use crate::core::{FileId, MediaKind, PendingFile};

/// 缩略图尺寸与质量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThumbnailSpec {
    /// 长边上限 (像素)
    pub max_edge: u32,
    /// JPEG 质量 1-100
    pub quality: u8,
}

impl ThumbnailSpec {
    /// 发布页列表预览
    pub const LIST: ThumbnailSpec = ThumbnailSpec { max_edge: 320, quality: 90 };
    /// 详情页模态框预览
    pub const MODAL: ThumbnailSpec = ThumbnailSpec { max_edge: 200, quality: 80 };
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self::LIST
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// JPEG 数据
    pub data: Bytes,
}

impl Thumbnail {
    pub const MIME: &'static str = "image/jpeg";

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", Self::MIME, BASE64_STANDARD.encode(&self.data))
    }
}

/// 保持宽高比，让长边不超过 `max_edge`；本来就小的图不放大
pub fn fit_within(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width > height {
        if width > max_edge {
            let scaled = (height as f64 * max_edge as f64 / width as f64).round() as u32;
            return (max_edge, scaled.max(1));
        }
    } else if height > max_edge {
        let scaled = (width as f64 * max_edge as f64 / height as f64).round() as u32;
        return (scaled.max(1), max_edge);
    }

    (width, height)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailGenerator {
    spec: ThumbnailSpec,
}

impl ThumbnailGenerator {
    pub fn new(spec: ThumbnailSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> ThumbnailSpec {
        self.spec
    }

    /// 生成一次性预览图，永远不会返回错误
    pub async fn generate(&self, file: &PendingFile) -> Option<Thumbnail> {
        if file.kind() != MediaKind::Image {
            return None;
        }

        let data = file.data.clone();
        let spec = self.spec;

        match tokio::task::spawn_blocking(move || render(&data, spec)).await {
            Ok(Ok(thumbnail)) => Some(thumbnail),
            Ok(Err(err)) => {
                tracing::debug!(file_id = %file.id, name = %file.name, error = %err, "Thumbnail decode failed");
                None
            }
            Err(err) => {
                tracing::warn!(file_id = %file.id, error = %err, "Thumbnail worker panicked");
                None
            }
        }
    }

    /// 并发生成，结果通过 FileId 对应回文件，不依赖完成顺序
    pub async fn generate_all(&self, files: &[PendingFile]) -> Vec<(FileId, Option<Thumbnail>)> {
        let jobs = files.iter().map(|file| async move {
            (file.id, self.generate(file).await)
        });

        join_all(jobs).await
    }
}

fn render(data: &[u8], spec: ThumbnailSpec) -> Result<Thumbnail, ImageError> {
    let img = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;

    let (width, height) = fit_within(img.width(), img.height(), spec.max_edge);
    let img = if (width, height) != (img.width(), img.height()) {
        img.resize_exact(width, height, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG 不支持透明通道
    let rgb = img.to_rgb8();
    let mut buffer = Vec::with_capacity((width * height) as usize / 4);
    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, spec.quality.clamp(1, 100));
    encoder.encode_image(&rgb)?;

    Ok(Thumbnail {
        width,
        height,
        data: Bytes::from(buffer),
    })
}
