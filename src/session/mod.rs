//! 发布页的上传会话
//!
//! 两个通道 (生成图 / 参考图) 各有一个注册表和一个预览列表。生成图新加入
//! 的文件会自动提交查重，结果回来时只标记仍然存在的节点。

mod events;
mod library;
mod publish;

pub use events::{Notice, SessionEvent};
pub use library::LibraryCheck;
pub use publish::{PublishForm, SERVER_FILES_FIELD};

use std::collections::{HashMap, HashSet};

use tokio::sync::broadcast;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::config::ClientConfig;
use crate::core::{FileId, PendingFile, ServerStagedFile, Slot, UploadError};
use crate::dedup::{correlate, BatchId, CheckId, CheckRequest, DuplicateCheckApi, UploadBatch};
use crate::preview::{NodeOrigin, PreviewBoard, PreviewContent};
use crate::registry::SlotRegistry;
use crate::thumbnail::{Thumbnail, ThumbnailGenerator, ThumbnailSpec};

/// 一次正在进行的查重，丢弃时取消请求
pub struct CheckTicket {
    slot: Slot,
    request: CheckRequest,
    token: CancellationToken,
    _guard: DropGuard,
}

impl CheckTicket {
    pub fn check_id(&self) -> CheckId {
        self.request.check_id
    }

    pub fn request(&self) -> &CheckRequest {
        &self.request
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

#[derive(Default)]
pub struct AddReport {
    pub accepted: Vec<FileId>,
    pub filtered: usize,
    /// 只有生成图通道且有新文件时才需要查重
    pub check: Option<CheckTicket>,
}

#[derive(Debug)]
pub enum CheckOutcome {
    Checked {
        batch: UploadBatch,
        /// 实际标红的节点数
        marked: usize,
    },
    Cancelled,
    Failed(UploadError),
}

struct InFlight {
    remaining: HashSet<FileId>,
    token: CancellationToken,
}

pub struct UploadSession {
    primary: SlotRegistry,
    reference: SlotRegistry,
    primary_board: PreviewBoard,
    reference_board: PreviewBoard,
    thumbnails: ThumbnailGenerator,
    in_flight: HashMap<CheckId, InFlight>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new(ThumbnailSpec::LIST)
    }
}

impl UploadSession {
    /// 预览缩略图使用 `list_thumbnail`
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.list_thumbnail)
    }

    pub fn new(spec: ThumbnailSpec) -> Self {
        // 最大缓存 256 个事件
        let (event_tx, _) = broadcast::channel(256);

        Self {
            primary: SlotRegistry::new(Slot::Primary),
            reference: SlotRegistry::new(Slot::Reference),
            primary_board: PreviewBoard::new(),
            reference_board: PreviewBoard::new(),
            thumbnails: ThumbnailGenerator::new(spec),
            in_flight: HashMap::new(),
            event_tx,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub fn registry(&self, slot: Slot) -> &SlotRegistry {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Reference => &self.reference,
        }
    }

    pub fn board(&self, slot: Slot) -> &PreviewBoard {
        match slot {
            Slot::Primary => &self.primary_board,
            Slot::Reference => &self.reference_board,
        }
    }

    pub fn thumbnail_generator(&self) -> ThumbnailGenerator {
        self.thumbnails
    }

    /// 未被取消的查重数
    pub fn in_flight_checks(&self) -> usize {
        self.in_flight.values().filter(|f| !f.token.is_cancelled()).count()
    }

    fn prune_in_flight(&mut self) {
        self.in_flight.retain(|check_id, in_flight| {
            let keep = !in_flight.token.is_cancelled();
            if !keep {
                tracing::debug!(%check_id, "Dropping cancelled check");
            }
            keep
        });
    }

    fn parts_mut(&mut self, slot: Slot) -> (&mut SlotRegistry, &mut PreviewBoard) {
        match slot {
            Slot::Primary => (&mut self.primary, &mut self.primary_board),
            Slot::Reference => (&mut self.reference, &mut self.reference_board),
        }
    }

    fn emit(&self, event: SessionEvent) {
        // 没有订阅者时发送失败，忽略即可
        let _ = self.event_tx.send(event);
    }

    /// 用户选择或拖入一批文件
    pub fn add_files(&mut self, slot: Slot, files: impl IntoIterator<Item = PendingFile>) -> AddReport {
        let (registry, board) = self.parts_mut(slot);
        let outcome = registry.add_many(files);
        let mut report = AddReport {
            accepted: outcome.accepted,
            filtered: outcome.filtered,
            check: None,
        };

        for id in &report.accepted {
            if let Some(added) = registry.get(*id) {
                board.push_local(added);
            }
        }

        let to_check: Vec<PendingFile> = report
            .accepted
            .iter()
            .filter_map(|id| registry.get(*id).cloned())
            .collect();

        tracing::debug!(?slot, accepted = report.accepted.len(), filtered = report.filtered, "Files added");

        if report.filtered > 0 {
            self.emit(SessionEvent::Notice(Notice::DuplicatesFiltered { count: report.filtered }));
        }
        if !report.accepted.is_empty() {
            self.emit(SessionEvent::FilesAdded {
                slot,
                accepted: report.accepted.clone(),
                filtered: report.filtered,
            });
        }

        if slot == Slot::Primary && !to_check.is_empty() {
            report.check = Some(self.start_check(slot, to_check));
        }

        report
    }

    fn start_check(&mut self, slot: Slot, files: Vec<PendingFile>) -> CheckTicket {
        let request = CheckRequest {
            check_id: CheckId::new(),
            files,
        };
        let token = CancellationToken::new();

        self.prune_in_flight();
        self.in_flight.insert(
            request.check_id,
            InFlight {
                remaining: request.file_ids().into_iter().collect(),
                token: token.clone(),
            },
        );
        self.emit(SessionEvent::CheckStarted {
            check_id: request.check_id,
            files: request.files.len(),
        });

        CheckTicket {
            slot,
            request,
            _guard: token.clone().drop_guard(),
            token,
        }
    }

    /// 引入服务端已暂存的文件
    pub fn stage_server_file(&mut self, slot: Slot, file: ServerStagedFile) -> bool {
        let (registry, board) = self.parts_mut(slot);
        if !registry.stage_server_file(file.clone()) {
            return false;
        }

        board.push_staged(&file);
        true
    }

    pub fn remove(&mut self, slot: Slot, id: FileId) -> Option<PendingFile> {
        let (registry, board) = self.parts_mut(slot);
        let removed = registry.remove(id)?;
        board.remove(id);

        self.after_remove(slot, id);
        Some(removed)
    }

    /// 按预览列表中的可见位置删除，位置里可能夹着服务端暂存节点
    pub fn remove_visible(&mut self, slot: Slot, visible_index: usize) -> bool {
        let (registry, board) = self.parts_mut(slot);
        let Some(node) = board.node_at(visible_index) else {
            return false;
        };

        match node.origin.clone() {
            NodeOrigin::ServerStaged { name, size } => {
                registry.unstage(&name, size);
                board.remove_at(visible_index);

                self.emit(SessionEvent::StagedFileRemoved { slot, name });
                true
            }
            NodeOrigin::Local(id) => {
                let Some(local_index) = board.local_index_of(visible_index) else {
                    return false;
                };
                let Some(removed) = registry.remove_at(local_index) else {
                    return false;
                };
                debug_assert_eq!(removed.id, id);
                board.remove_at(visible_index);

                self.after_remove(slot, id);
                true
            }
        }
    }

    fn after_remove(&mut self, slot: Slot, id: FileId) {
        // 一次查重里的文件全部被删掉后，取消该请求
        for (check_id, in_flight) in self.in_flight.iter_mut() {
            if in_flight.remaining.remove(&id) && in_flight.remaining.is_empty() {
                tracing::debug!(%check_id, "All files removed, cancelling check");
                in_flight.token.cancel();
            }
        }
        self.prune_in_flight();

        self.emit(SessionEvent::FileRemoved { slot, file_id: id });
    }

    /// 仍在加载中的本地文件，可以交给 `thumbnail_generator()` 在会话之外生成
    pub fn pending_thumbnails(&self, slot: Slot) -> Vec<PendingFile> {
        let (registry, board) = (self.registry(slot), self.board(slot));

        board
            .nodes()
            .iter()
            .filter(|n| n.content == PreviewContent::Loading)
            .filter_map(|n| n.file_id().and_then(|id| registry.get(id).cloned()))
            .collect()
    }

    /// 按 FileId 回填缩略图；生成期间节点可能已被删除，此时返回 false
    pub fn apply_thumbnail(&mut self, slot: Slot, file_id: FileId, thumbnail: Option<Thumbnail>) -> bool {
        let available = thumbnail.is_some();
        let (_, board) = self.parts_mut(slot);
        if !board.attach_thumbnail(file_id, thumbnail) {
            tracing::debug!(?slot, %file_id, "Thumbnail for removed file dropped");
            return false;
        }

        self.emit(SessionEvent::ThumbnailReady { slot, file_id, available });
        true
    }

    /// 生成并回填当前所有待处理的缩略图
    pub async fn attach_thumbnails(&mut self, slot: Slot) -> usize {
        let pending = self.pending_thumbnails(slot);
        let results = self.thumbnails.generate_all(&pending).await;

        let mut attached = 0;
        for (file_id, thumbnail) in results {
            if self.apply_thumbnail(slot, file_id, thumbnail) {
                attached += 1;
            }
        }

        attached
    }

    /// 发送查重请求并应用结果
    pub async fn run_check<A>(&mut self, ticket: CheckTicket, api: &A) -> CheckOutcome
    where
        A: DuplicateCheckApi + ?Sized,
    {
        let outcome = api.check_duplicates(ticket.request(), ticket.token()).await;
        self.complete_check(ticket, outcome)
    }

    /// 应用一次查重的结果；失败时不修改任何标记
    pub fn complete_check(&mut self, ticket: CheckTicket, outcome: crate::core::Result<UploadBatch>) -> CheckOutcome {
        let check_id = ticket.check_id();
        self.in_flight.remove(&check_id);

        let batch = match outcome {
            Ok(batch) => batch,
            Err(err) => {
                match Notice::from_error(&err) {
                    Some(notice) => {
                        tracing::warn!(%check_id, error = %err, "Duplicate check failed");
                        self.emit(SessionEvent::Notice(notice));
                    }
                    None => {
                        self.emit(SessionEvent::CheckCancelled { check_id });
                        return CheckOutcome::Cancelled;
                    }
                }
                return CheckOutcome::Failed(err);
            }
        };

        let correlation = correlate(ticket.request(), &batch);
        let (_, board) = self.parts_mut(ticket.slot);

        let mut marked = 0;
        for (file_id, result) in &correlation.matched {
            if result.is_duplicate() && board.mark_duplicate(*file_id, result.existing_group_title.as_deref()) {
                marked += 1;
            }
        }

        tracing::info!(%check_id, batch_id = %batch.batch_id, results = batch.results.len(), marked, "Duplicate check completed");

        // 标红的节点都已被删除时不再提示
        if batch.has_duplicate && marked > 0 {
            self.emit(SessionEvent::Notice(Notice::DuplicatesFound));
        }
        self.emit(SessionEvent::CheckCompleted {
            check_id,
            batch_id: batch.batch_id.clone(),
            marked,
        });

        CheckOutcome::Checked { batch, marked }
    }

    /// 构建发布表单，不会发送
    pub fn publish_form(&self, batch_id: Option<BatchId>) -> PublishForm {
        let mut form = PublishForm::new(batch_id);

        for registry in [&self.primary, &self.reference] {
            for file in registry.files() {
                form.push_file(file.clone());
            }
        }
        for staged in self.primary.staged() {
            form.push_server_file(staged.name.clone());
        }

        form
    }

    /// 发布成功后清空
    pub fn reset(&mut self) {
        for in_flight in self.in_flight.values() {
            in_flight.token.cancel();
        }
        self.in_flight.clear();

        self.primary.clear();
        self.reference.clear();
        self.primary_board.clear();
        self.reference_board.clear();

        self.emit(SessionEvent::Reset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::{CheckStatus, DuplicateCheckResult};

    fn png(name: &str, width: u32, height: u32) -> PendingFile {
        use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([30, 30, 30])))
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        PendingFile::new(name, "image/png", buffer, Slot::Primary)
    }

    fn drain(events: &mut broadcast::Receiver<SessionEvent>) -> Vec<SessionEvent> {
        std::iter::from_fn(|| events.try_recv().ok()).collect()
    }

    fn file(name: &str, size: usize) -> PendingFile {
        PendingFile::new(name, "image/png", vec![0u8; size], Slot::Primary)
    }

    fn batch(results: Vec<(&str, CheckStatus)>) -> UploadBatch {
        let results: Vec<DuplicateCheckResult> = results
            .into_iter()
            .map(|(name, status)| DuplicateCheckResult {
                filename: name.to_string(),
                status,
                thumbnail_url: String::new(),
                existing_group_id: Some(1),
                existing_group_title: Some("Old".to_string()),
                is_video: false,
            })
            .collect();

        UploadBatch {
            batch_id: BatchId::new("X"),
            has_duplicate: results.iter().any(|r| r.is_duplicate()),
            results,
        }
    }

    #[test]
    fn test_only_new_primary_files_are_checked() {
        let mut session = UploadSession::default();

        let first = session.add_files(Slot::Primary, vec![file("a.png", 500)]);
        assert_eq!(first.check.as_ref().unwrap().request().files.len(), 1);

        let second = session.add_files(Slot::Primary, vec![file("a.png", 500), file("b.png", 500)]);
        let request = second.check.as_ref().unwrap().request();
        assert_eq!(second.filtered, 1);
        assert_eq!(request.files.len(), 1);
        assert_eq!(request.files[0].name, "b.png");

        let refs = session.add_files(Slot::Reference, vec![file("r.png", 10)]);
        assert!(refs.check.is_none());
        assert_eq!(session.registry(Slot::Reference).len(), 1);

        let none = session.add_files(Slot::Primary, vec![file("a.png", 500)]);
        assert!(none.check.is_none());
    }

    #[test]
    fn test_failed_check_leaves_markers_alone() {
        let mut session = UploadSession::default();
        let mut events = session.subscribe();
        let report = session.add_files(Slot::Primary, vec![file("a.png", 5)]);

        let outcome = session.complete_check(report.check.unwrap(), Err(UploadError::rejected(Some("服务器繁忙".into()))));

        assert!(matches!(outcome, CheckOutcome::Failed(_)));
        assert_eq!(session.board(Slot::Primary).duplicate_count(), 0);
        assert_eq!(session.in_flight_checks(), 0);

        let mut notices = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let SessionEvent::Notice(notice) = event {
                notices.push(notice);
            }
        }
        assert_eq!(notices, vec![Notice::RequestFailed { message: "服务器繁忙".to_string() }]);
    }

    #[test]
    fn test_transport_failure_emits_network_error() {
        let mut session = UploadSession::default();
        let mut events = session.subscribe();
        let report = session.add_files(Slot::Primary, vec![file("a.png", 5)]);

        let decode_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        session.complete_check(report.check.unwrap(), Err(UploadError::Decode(decode_err)));

        let found = std::iter::from_fn(|| events.try_recv().ok())
            .any(|e| matches!(e, SessionEvent::Notice(Notice::NetworkError)));
        assert!(found);
        assert_eq!(session.board(Slot::Primary).duplicate_count(), 0);
    }

    #[test]
    fn test_removing_all_files_cancels_check() {
        let mut session = UploadSession::default();
        let a = file("a.png", 1);
        let b = file("b.png", 2);
        let (a_id, b_id) = (a.id, b.id);
        let report = session.add_files(Slot::Primary, vec![a, b]);
        let ticket = report.check.unwrap();

        session.remove(Slot::Primary, a_id);
        assert!(!ticket.is_cancelled());

        session.remove(Slot::Primary, b_id);
        assert!(ticket.is_cancelled());

        let outcome = session.complete_check(ticket, Err(UploadError::Cancelled));
        assert!(matches!(outcome, CheckOutcome::Cancelled));
    }

    #[test]
    fn test_late_result_for_removed_file_is_ignored() {
        let mut session = UploadSession::default();
        let a = file("a.png", 1);
        let b = file("b.png", 2);
        let a_id = a.id;
        let ticket = session.add_files(Slot::Primary, vec![a, b]).check.unwrap();

        session.remove(Slot::Primary, a_id);

        let outcome = session.complete_check(
            ticket,
            Ok(batch(vec![("a.png", CheckStatus::Duplicate), ("b.png", CheckStatus::Duplicate)])),
        );

        match outcome {
            CheckOutcome::Checked { marked, .. } => assert_eq!(marked, 1),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(session.board(Slot::Primary).duplicate_count(), 1);
        assert!(session.board(Slot::Primary).get(a_id).is_none());
    }

    #[test]
    fn test_remove_visible_with_interleaved_staged_files() {
        let mut session = UploadSession::default();
        session.stage_server_file(
            Slot::Primary,
            ServerStagedFile { name: "s.png".into(), size: 9, url: "/media/s.png".into() },
        );
        session.add_files(Slot::Primary, vec![file("a.png", 1), file("b.png", 2)]);

        // 可见顺序: s.png, a.png, b.png
        assert!(session.remove_visible(Slot::Primary, 2));

        let names: Vec<&str> = session.registry(Slot::Primary).files().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png"]);
        let input: Vec<&str> = session
            .registry(Slot::Primary)
            .input()
            .files()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(input, names);

        // 删除暂存文件不影响本地文件
        assert!(session.remove_visible(Slot::Primary, 0));
        assert!(session.registry(Slot::Primary).staged().is_empty());
        assert_eq!(session.registry(Slot::Primary).len(), 1);
        assert_eq!(session.board(Slot::Primary).len(), 1);

        assert!(!session.remove_visible(Slot::Primary, 5));
    }

    #[test]
    fn test_staged_file_blocks_same_local_file() {
        let mut session = UploadSession::default();
        assert!(session.stage_server_file(
            Slot::Primary,
            ServerStagedFile { name: "a.png".into(), size: 500, url: "/media/a.png".into() },
        ));

        let report = session.add_files(Slot::Primary, vec![file("a.png", 500)]);
        assert!(report.accepted.is_empty());
        assert!(report.check.is_none());
    }

    #[test]
    fn test_publish_form_and_reset() {
        let mut session = UploadSession::default();
        session.stage_server_file(
            Slot::Primary,
            ServerStagedFile { name: "s.png".into(), size: 9, url: "/media/s.png".into() },
        );
        let ticket = session.add_files(Slot::Primary, vec![file("a.png", 1)]).check.unwrap();
        session.add_files(Slot::Reference, vec![file("r.png", 1)]);

        let form = session.publish_form(Some(BatchId::new("X")));
        assert_eq!(form.files().len(), 2);
        assert_eq!(form.files()[1].slot, Slot::Reference);
        assert_eq!(form.server_files(), ["s.png".to_string()]);
        assert_eq!(form.batch_id(), Some(&BatchId::new("X")));

        session.reset();
        assert!(ticket.is_cancelled());
        assert!(session.registry(Slot::Primary).is_empty());
        assert!(session.registry(Slot::Primary).input().is_empty());
        assert!(session.board(Slot::Reference).is_empty());
        assert_eq!(session.in_flight_checks(), 0);
    }

    #[tokio::test]
    async fn test_attach_thumbnails_fills_fallbacks() {
        let mut session = UploadSession::default();
        let video = PendingFile::new("clip.mp4", "video/mp4", vec![0u8; 4], Slot::Primary);
        let broken = file("broken.png", 3);
        let video_id = video.id;
        session.add_files(Slot::Primary, vec![video, broken]);

        assert_eq!(session.attach_thumbnails(Slot::Primary).await, 2);
        assert_eq!(
            session.board(Slot::Primary).get(video_id).unwrap().content,
            PreviewContent::VideoBadge
        );

        // 已经处理过的节点不会重复生成
        assert_eq!(session.attach_thumbnails(Slot::Primary).await, 0);
    }

    #[tokio::test]
    async fn test_thumbnails_generated_outside_session_skip_removed_files() {
        let mut session = UploadSession::default();
        let mut events = session.subscribe();
        let a = png("a.png", 640, 480);
        let b = png("b.png", 64, 64);
        let (a_id, b_id) = (a.id, b.id);
        session.add_files(Slot::Primary, vec![a, b]);

        let pending = session.pending_thumbnails(Slot::Primary);
        assert_eq!(pending.len(), 2);

        let generator = session.thumbnail_generator();
        let job = tokio::spawn(async move { generator.generate_all(&pending).await });

        // 生成期间用户删掉了 a.png
        session.remove(Slot::Primary, a_id);

        let results = job.await.unwrap();
        assert_eq!(results.len(), 2);
        let applied: Vec<FileId> = results
            .into_iter()
            .filter_map(|(id, thumbnail)| session.apply_thumbnail(Slot::Primary, id, thumbnail).then_some(id))
            .collect();

        assert_eq!(applied, vec![b_id]);
        assert!(matches!(
            session.board(Slot::Primary).get(b_id).unwrap().content,
            PreviewContent::Ready(_)
        ));
        assert!(session.pending_thumbnails(Slot::Primary).is_empty());

        let ready: Vec<FileId> = drain(&mut events)
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::ThumbnailReady { file_id, available: true, .. } => Some(file_id),
                _ => None,
            })
            .collect();
        assert_eq!(ready, vec![b_id]);
    }

    #[test]
    fn test_from_config_uses_list_thumbnail() {
        let mut config = ClientConfig::default();
        config.list_thumbnail = ThumbnailSpec { max_edge: 480, quality: 85 };

        let session = UploadSession::from_config(&config);
        assert_eq!(session.thumbnail_generator().spec(), config.list_thumbnail);
    }

    #[test]
    fn test_no_duplicate_toast_when_flagged_files_are_gone() {
        let mut session = UploadSession::default();
        let mut events = session.subscribe();
        let a = file("a.png", 1);
        let a_id = a.id;
        let ticket = session.add_files(Slot::Primary, vec![a, file("b.png", 2)]).check.unwrap();

        session.remove(Slot::Primary, a_id);

        let outcome = session.complete_check(
            ticket,
            Ok(batch(vec![("a.png", CheckStatus::Duplicate), ("b.png", CheckStatus::Clean)])),
        );
        assert!(matches!(outcome, CheckOutcome::Checked { marked: 0, ref batch } if batch.has_duplicate));

        let events = drain(&mut events);
        assert!(!events.iter().any(|e| matches!(e, SessionEvent::Notice(Notice::DuplicatesFound))));
        assert!(events.iter().any(|e| matches!(e, SessionEvent::CheckCompleted { marked: 0, .. })));
    }

    #[test]
    fn test_abandoned_checks_are_pruned() {
        let mut session = UploadSession::default();

        let dropped = session.add_files(Slot::Primary, vec![file("a.png", 1)]).check.unwrap();
        let token = dropped.token();
        drop(dropped);
        assert!(token.is_cancelled());
        assert_eq!(session.in_flight_checks(), 0);

        let b = file("b.png", 2);
        let b_id = b.id;
        let kept = session.add_files(Slot::Primary, vec![b]).check.unwrap();
        assert_eq!(session.in_flight.len(), 1);
        assert_eq!(session.in_flight_checks(), 1);

        // 全部删除后立即移出
        session.remove(Slot::Primary, b_id);
        assert!(kept.is_cancelled());
        assert!(session.in_flight.is_empty());
    }

    #[test]
    fn test_removing_staged_file_emits_event() {
        let mut session = UploadSession::default();
        let mut events = session.subscribe();
        session.stage_server_file(
            Slot::Primary,
            ServerStagedFile { name: "s.png".into(), size: 9, url: "/media/s.png".into() },
        );

        assert!(session.remove_visible(Slot::Primary, 0));

        let removed: Vec<String> = drain(&mut events)
            .into_iter()
            .filter_map(|e| match e {
                SessionEvent::StagedFileRemoved { slot: Slot::Primary, name } => Some(name),
                _ => None,
            })
            .collect();
        assert_eq!(removed, vec!["s.png".to_string()]);
    }
}
