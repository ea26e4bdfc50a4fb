//! # Workflow Errors
//!
//! ワークフローのエラー分類
//!
//! どのエラーもプロセスを終了させない。取得・デコード系はログに残して握りつぶし、
//! アップロード失敗は理由をそのままユーザーに通知する。

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// ユーザーが選択・撮影を取り消した
    #[error("acquisition cancelled")]
    AcquisitionCancelled,

    /// 選択・撮影の操作そのものが失敗した
    #[error("acquisition failed: {0}")]
    AcquisitionFailed(String),

    /// カメラの使用が許可されていない
    #[error("camera permission denied: {0}")]
    PermissionDenied(String),

    /// 参照を画像として解釈できなかった
    #[error("failed to decode image: {0}")]
    Decode(String),

    /// 別のアップロードが進行中
    #[error("an upload is already in progress")]
    UploadInFlight,
}
