//! # Upload Events
//!
//! アップロード中に流れる進捗と終端結果

use std::fmt;

/// アップロード進捗（0〜100のパーセント）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadProgress(u8);

impl UploadProgress {
    pub const ZERO: Self = Self(0);
    pub const COMPLETE: Self = Self(100);

    /// パーセント値から作成（100を超える値は100に丸める）
    pub fn new(percent: u8) -> Self {
        Self(percent.min(100))
    }

    /// 転送済みバイト数から作成
    ///
    /// `100 * transferred / total` を切り捨てで計算する。
    /// `total` が0の場合は完了扱い。
    ///
    /// ```
    /// use photolift::domain::entities::upload_event::UploadProgress;
    ///
    /// assert_eq!(UploadProgress::from_bytes(0, 200).percent(), 0);
    /// assert_eq!(UploadProgress::from_bytes(84, 200).percent(), 42);
    /// assert_eq!(UploadProgress::from_bytes(199, 200).percent(), 99);
    /// assert_eq!(UploadProgress::from_bytes(0, 0).percent(), 100);
    /// ```
    pub fn from_bytes(transferred: u64, total: u64) -> Self {
        if total == 0 {
            return Self::COMPLETE;
        }
        let transferred = transferred.min(total) as u128;
        Self((transferred * 100 / total as u128) as u8)
    }

    #[inline]
    pub fn percent(self) -> u8 {
        self.0
    }
}

impl fmt::Display for UploadProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// アップロードの終端結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Failure(String),
}

impl UploadOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// 失敗理由（成功時は `None`）
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}

/// ストレージから流れてくるイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Progress(UploadProgress),
    Finished(UploadOutcome),
}

impl UploadEvent {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Finished(UploadOutcome::Failure(reason.into()))
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}
