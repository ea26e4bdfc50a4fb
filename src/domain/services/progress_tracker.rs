//! # Progress Tracker
//!
//! 進捗通知の単調性を保証するサービス

use crate::domain::entities::upload_event::UploadProgress;

/// 進捗トラッカー
///
/// ストレージから届いた進捗のうち、直前の値より小さいもの（逆戻り）を捨てる。
/// 同じ値の再通知はそのまま通す。
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: Option<UploadProgress>,
    relayed: usize,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// 進捗を観測する
    ///
    /// # Returns
    ///
    /// 表示すべき場合は `Some(progress)`、逆戻りで捨てる場合は `None`
    pub fn observe(&mut self, progress: UploadProgress) -> Option<UploadProgress> {
        if let Some(last) = self.last {
            if progress < last {
                return None;
            }
        }
        self.last = Some(progress);
        self.relayed += 1;
        Some(progress)
    }

    /// 最後に通した進捗
    pub fn last(&self) -> Option<UploadProgress> {
        self.last
    }

    /// 通した進捗の数
    pub fn relayed(&self) -> usize {
        self.relayed
    }
}
