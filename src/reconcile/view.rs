use crate::config::ClientConfig;
use crate::dedup::{BatchId, DuplicateCheckResult, UploadBatch};

/// 结果页用到的站内链接
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    pub publish_path: String,
    pub detail_path_prefix: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl Routes {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            publish_path: config.publish_path.clone(),
            detail_path_prefix: config.detail_path_prefix.clone(),
        }
    }

    /// 发布页链接，带上 batch_id 以便服务端找回临时文件
    pub fn publish_url(&self, batch_id: &BatchId) -> String {
        format!("{}?batch_id={}", self.publish_path, urlencoding::encode(batch_id.as_str()))
    }

    pub fn detail_url(&self, group_id: i64) -> String {
        format!("{}{}/", self.detail_path_prefix, group_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardKind {
    Duplicate {
        existing_group_title: String,
        /// 服务端没有返回作品 ID 时为 None
        detail_url: Option<String>,
    },
    Clean,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub filename: String,
    pub thumbnail_url: String,
    pub is_video: bool,
    pub kind: CardKind,
}

impl ResultCard {
    fn from_result(result: &DuplicateCheckResult, routes: &Routes) -> Self {
        let kind = if result.is_duplicate() {
            CardKind::Duplicate {
                existing_group_title: result.existing_group_title.clone().unwrap_or_default(),
                detail_url: result.existing_group_id.map(|id| routes.detail_url(id)),
            }
        } else {
            CardKind::Clean
        };

        Self {
            filename: result.filename.clone(),
            thumbnail_url: result.thumbnail_url.clone(),
            is_video: result.is_video,
            kind,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self.kind, CardKind::Duplicate { .. })
    }

    pub fn headline(&self) -> &'static str {
        match self.kind {
            CardKind::Duplicate { .. } => "已存在",
            CardKind::Clean => "通过检测",
        }
    }
}

/// 查重后的下一步；渲染器只给出链接，不会执行发布
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// 全部通过，只有发布入口
    Publish { publish_url: String },
    /// 存在重复，可以关闭或仍要发布
    PublishAnyway { publish_url: String },
}

impl NextAction {
    pub fn publish_url(&self) -> &str {
        match self {
            NextAction::Publish { publish_url } | NextAction::PublishAnyway { publish_url } => publish_url,
        }
    }

    pub fn can_close(&self) -> bool {
        matches!(self, NextAction::PublishAnyway { .. })
    }

    pub fn publish_label(&self) -> &'static str {
        match self {
            NextAction::Publish { .. } => "去发布新作品",
            NextAction::PublishAnyway { .. } => "仍要发布",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationView {
    pub batch_id: BatchId,
    pub cards: Vec<ResultCard>,
    pub total: usize,
    pub duplicates: usize,
    pub next_action: NextAction,
}

impl ReconciliationView {
    pub fn from_batch(batch: &UploadBatch, routes: &Routes) -> Self {
        let cards: Vec<ResultCard> = batch
            .results
            .iter()
            .map(|result| ResultCard::from_result(result, routes))
            .collect();
        let duplicates = cards.iter().filter(|c| c.is_duplicate()).count();

        let publish_url = routes.publish_url(&batch.batch_id);
        let next_action = if batch.has_duplicate {
            NextAction::PublishAnyway { publish_url }
        } else {
            NextAction::Publish { publish_url }
        };

        Self {
            batch_id: batch.batch_id.clone(),
            total: cards.len(),
            cards,
            duplicates,
            next_action,
        }
    }

    pub fn summary(&self) -> String {
        format!("共检测 {} 张，发现 {} 张重复", self.total, self.duplicates)
    }
}
