use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::core::{FileId, PendingFile, Result};
use crate::dedup::{CheckRequest, DuplicateCheckApi};
use crate::reconcile::{CheckCycle, CyclePhase, ReconciliationView, Routes};
use crate::thumbnail::{Thumbnail, ThumbnailGenerator, ThumbnailSpec};

/// 全库查重：批量上传后展示比对结果，再引导用户去发布
pub struct LibraryCheck {
    cycle: CheckCycle,
    routes: Routes,
    thumbnails: ThumbnailGenerator,
    view: Option<ReconciliationView>,
}

impl LibraryCheck {
    pub fn new(routes: Routes) -> Self {
        Self {
            cycle: CheckCycle::new(),
            routes,
            thumbnails: ThumbnailGenerator::new(ThumbnailSpec::MODAL),
            view: None,
        }
    }

    /// 模态框预览使用 `modal_thumbnail`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            thumbnails: ThumbnailGenerator::new(config.modal_thumbnail),
            ..Self::new(Routes::from_config(config))
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.cycle.phase()
    }

    pub fn view(&self) -> Option<&ReconciliationView> {
        self.view.as_ref()
    }

    /// 提交前在模态框里展示的预览
    pub async fn previews(&self, files: &[PendingFile]) -> Vec<(FileId, Option<Thumbnail>)> {
        self.thumbnails.generate_all(files).await
    }

    /// 提交文件并渲染结果；失败时恢复到提交前的状态
    pub async fn submit<A>(&mut self, files: Vec<PendingFile>, api: &A) -> Result<&ReconciliationView>
    where
        A: DuplicateCheckApi + ?Sized,
    {
        let request = CheckRequest::new(files)?;
        self.cycle.begin_check()?;
        self.view = None;

        let batch = match api.check_duplicates(&request, CancellationToken::new()).await {
            Ok(batch) => batch,
            Err(err) => {
                self.cycle.abort_check()?;
                return Err(err);
            }
        };

        if let Err(err) = self.cycle.finish_check(&batch.batch_id, batch.has_duplicate) {
            self.cycle.abort_check()?;
            return Err(err);
        }

        tracing::info!(
            batch_id = %batch.batch_id,
            total = batch.results.len(),
            duplicates = batch.duplicate_count(),
            "Library check finished"
        );

        let view = ReconciliationView::from_batch(&batch, &self.routes);
        Ok(&*self.view.insert(view))
    }

    pub fn close(&mut self) -> Result<()> {
        self.cycle.close()
    }

    /// 进入发布流程，返回带 batch_id 的发布页链接
    pub fn publish(&mut self) -> Result<String> {
        let batch_id = self.cycle.publish()?;
        Ok(self.routes.publish_url(&batch_id))
    }
}
