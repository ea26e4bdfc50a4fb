//! # Media Repository Traits
//!
//! 画像の取得（ギャラリー・カメラ）とデコードを抽象化

use async_trait::async_trait;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::entities::preview::Preview;
use crate::domain::errors::WorkflowError;

/// 画像ピッカー
///
/// 画像タイプに限定した選択ダイアログを表示する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImagePicker: Send + Sync {
    /// 画像を1枚選択する
    ///
    /// # Arguments
    ///
    /// * `location` - 選択を始める場所（ファイルまたはディレクトリ）
    ///
    /// # Errors
    ///
    /// 取り消された場合は `WorkflowError::AcquisitionCancelled` を返す
    async fn pick_image(&self, location: &Path) -> Result<PendingSelection, WorkflowError>;
}

/// カメラ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CameraCapture: Send + Sync {
    /// 撮影して、撮影したフレームを返す
    ///
    /// # Errors
    ///
    /// 取り消された場合は `WorkflowError::AcquisitionCancelled` を返す
    async fn capture(&self) -> Result<PendingSelection, WorkflowError>;
}

/// 画像デコーダー
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    /// 選択された画像を表示用にデコードする
    ///
    /// # Errors
    ///
    /// 画像として解釈できない場合は `WorkflowError::Decode` を返す
    async fn decode(&self, selection: &PendingSelection) -> Result<Preview, WorkflowError>;
}
