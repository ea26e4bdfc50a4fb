//! # Presenter Port
//!
//! 表示層への出力（インジケーター・通知・プレビュー）

use std::fmt;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::preview::Preview;
use crate::domain::entities::upload_event::UploadProgress;

/// ユーザーへの一時的な通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// アップロード成功
    Uploaded { location: String },
    /// アップロード失敗（理由はストレージからの文言そのまま）
    UploadFailed { reason: String },
    /// 取得・権限エラーなど、アップロード以外の失敗
    Error(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uploaded { .. } => f.write_str("Uploaded"),
            Self::UploadFailed { reason } => write!(f, "Failed: {}", reason),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// 表示層
///
/// インジケーターは `show_indicator` 1回につき `dismiss_indicator` がちょうど1回呼ばれる。
#[cfg_attr(test, automock)]
pub trait UploadPresenter: Send + Sync {
    /// ブロッキングな「アップロード中」インジケーターを表示
    fn show_indicator(&self, title: &str);

    /// インジケーターの進捗表示を更新
    fn show_progress(&self, progress: UploadProgress);

    /// インジケーターを閉じる
    fn dismiss_indicator(&self);

    /// 通知を表示
    fn notify(&self, notice: &Notice);

    /// プレビューを表示
    fn show_preview(&self, preview: &Preview);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_display() {
        let uploaded = Notice::Uploaded {
            location: "gs://bucket/images/abc".to_string(),
        };
        assert_eq!(uploaded.to_string(), "Uploaded");

        let failed = Notice::UploadFailed {
            reason: "network error".to_string(),
        };
        assert_eq!(failed.to_string(), "Failed: network error");

        let error = Notice::Error("camera permission denied: no device".to_string());
        assert_eq!(error.to_string(), "camera permission denied: no device");
    }
}
