use std::collections::HashSet;

use crate::core::{Result, UploadError};
use crate::dedup::BatchId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    /// 正在上传并比对
    Checking,
    ResultsClean,
    ResultsWithDuplicates,
    /// 用户选择发布
    Publishing,
    Closed,
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// 一次 “查重 -> 发布” 的状态机
///
/// 每个 batch_id 只能进入一次结果状态，再次查重必须拿到新的 batch_id。
#[derive(Debug, Clone)]
pub struct CheckCycle {
    phase: CyclePhase,
    batch_id: Option<BatchId>,
    seen: HashSet<BatchId>,
}

impl Default for CheckCycle {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckCycle {
    pub fn new() -> Self {
        Self {
            phase: CyclePhase::Idle,
            batch_id: None,
            seen: HashSet::new(),
        }
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    pub fn batch_id(&self) -> Option<&BatchId> {
        self.batch_id.as_ref()
    }

    pub fn is_valid_transition(from: CyclePhase, to: CyclePhase) -> bool {
        use CyclePhase::*;

        matches!(
            (from, to),
            (Idle | Closed | ResultsClean | ResultsWithDuplicates, Checking)
                | (Checking, ResultsClean | ResultsWithDuplicates | Idle)
                | (ResultsClean | ResultsWithDuplicates, Publishing | Closed)
        )
    }

    fn transition(&mut self, to: CyclePhase) -> Result<()> {
        if !Self::is_valid_transition(self.phase, to) {
            return Err(UploadError::InvalidTransition {
                from: self.phase.to_string(),
                to: to.to_string(),
            });
        }

        tracing::debug!(from = %self.phase, to = %to, "Check cycle transition");
        self.phase = to;
        Ok(())
    }

    pub fn begin_check(&mut self) -> Result<()> {
        self.transition(CyclePhase::Checking)?;
        self.batch_id = None;
        Ok(())
    }

    /// 请求失败，界面恢复到提交前
    pub fn abort_check(&mut self) -> Result<()> {
        self.transition(CyclePhase::Idle)
    }

    pub fn finish_check(&mut self, batch_id: &BatchId, has_duplicate: bool) -> Result<()> {
        if self.phase == CyclePhase::Checking && self.seen.contains(batch_id) {
            return Err(UploadError::BatchReused(batch_id.to_string()));
        }

        let to = if has_duplicate {
            CyclePhase::ResultsWithDuplicates
        } else {
            CyclePhase::ResultsClean
        };
        self.transition(to)?;

        self.seen.insert(batch_id.clone());
        self.batch_id = Some(batch_id.clone());
        Ok(())
    }

    pub fn publish(&mut self) -> Result<BatchId> {
        self.transition(CyclePhase::Publishing)?;
        self.batch_id
            .clone()
            .ok_or_else(|| UploadError::Param("No batch to publish".to_string()))
    }

    pub fn close(&mut self) -> Result<()> {
        self.transition(CyclePhase::Closed)
    }
}
