use std::collections::HashSet;

use crate::core::FileId;
use super::types::{CheckRequest, DuplicateCheckResult, UploadBatch};

#[derive(Debug, Clone, Default)]
pub struct Correlation {
    pub matched: Vec<(FileId, DuplicateCheckResult)>,
    /// 找不到对应文件的结果，直接丢弃
    pub unmatched: Vec<DuplicateCheckResult>,
}

/// 把服务端按文件名返回的结果对应回请求里的 FileId
///
/// 同一批内有同名文件时按顺序消费，每个 FileId 最多匹配一次。
pub fn correlate(request: &CheckRequest, batch: &UploadBatch) -> Correlation {
    let mut used = HashSet::new();
    let mut correlation = Correlation::default();

    for result in &batch.results {
        let candidate = request
            .files
            .iter()
            .find(|f| f.name == result.filename && !used.contains(&f.id));

        match candidate {
            Some(file) => {
                used.insert(file.id);
                correlation.matched.push((file.id, result.clone()));
            }
            None => {
                tracing::debug!(
                    check_id = %request.check_id,
                    filename = %result.filename,
                    "Check result has no matching file"
                );
                correlation.unmatched.push(result.clone());
            }
        }
    }

    correlation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PendingFile, Slot};
    use crate::dedup::types::{BatchId, CheckStatus};

    fn result(filename: &str, status: CheckStatus) -> DuplicateCheckResult {
        DuplicateCheckResult {
            filename: filename.to_string(),
            status,
            thumbnail_url: String::new(),
            existing_group_id: None,
            existing_group_title: None,
            is_video: false,
        }
    }

    fn batch(results: Vec<DuplicateCheckResult>) -> UploadBatch {
        UploadBatch {
            batch_id: BatchId::new("X"),
            has_duplicate: results.iter().any(|r| r.is_duplicate()),
            results,
        }
    }

    #[test]
    fn test_correlate_by_name_not_index() {
        let a = PendingFile::new("a.png", "image/png", vec![0u8; 3], Slot::Primary);
        let b = PendingFile::new("b.png", "image/png", vec![0u8; 4], Slot::Primary);
        let request = CheckRequest::new(vec![a.clone(), b.clone()]).unwrap();

        // 服务端返回顺序与提交顺序不同
        let batch = batch(vec![
            result("b.png", CheckStatus::Clean),
            result("a.png", CheckStatus::Duplicate),
            result("ghost.png", CheckStatus::Duplicate),
        ]);

        let correlation = correlate(&request, &batch);
        assert_eq!(correlation.matched.len(), 2);
        assert_eq!(correlation.matched[0].0, b.id);
        assert_eq!(correlation.matched[1].0, a.id);
        assert_eq!(correlation.unmatched.len(), 1);
        assert_eq!(correlation.unmatched[0].filename, "ghost.png");
    }

    #[test]
    fn test_same_name_matches_each_file_once() {
        let first = PendingFile::new("a.png", "image/png", vec![0u8; 3], Slot::Primary);
        let second = PendingFile::new("a.png", "image/png", vec![0u8; 5], Slot::Primary);
        let request = CheckRequest::new(vec![first.clone(), second.clone()]).unwrap();

        let batch = batch(vec![
            result("a.png", CheckStatus::Duplicate),
            result("a.png", CheckStatus::Clean),
        ]);

        let correlation = correlate(&request, &batch);
        assert_eq!(correlation.matched[0].0, first.id);
        assert!(correlation.matched[0].1.is_duplicate());
        assert_eq!(correlation.matched[1].0, second.id);
        assert!(correlation.unmatched.is_empty());
    }
}
