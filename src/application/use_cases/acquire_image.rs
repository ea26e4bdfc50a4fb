//! # Acquire Image Use Case
//!
//! 画像の取得ユースケース（ギャラリー選択・カメラ撮影）

use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::errors::WorkflowError;
use crate::domain::repositories::media_repository::{CameraCapture, ImagePicker};
use crate::domain::repositories::permission_repository::{CameraPermission, PermissionStatus};

/// 画像取得ユースケース
///
/// 取り消しはエラーではなく `Ok(None)` として返す。
pub struct AcquireImageUseCase<G, C, K>
where
    G: ImagePicker + ?Sized,
    C: CameraCapture + ?Sized,
    K: CameraPermission + ?Sized,
{
    picker: Arc<G>,
    camera: Arc<C>,
    permission: Arc<K>,
}

impl<G, C, K> AcquireImageUseCase<G, C, K>
where
    G: ImagePicker + ?Sized,
    C: CameraCapture + ?Sized,
    K: CameraPermission + ?Sized,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `picker` - 画像ピッカー
    /// * `camera` - カメラ
    /// * `permission` - カメラ権限
    pub fn new(picker: Arc<G>, camera: Arc<C>, permission: Arc<K>) -> Self {
        Self {
            picker,
            camera,
            permission,
        }
    }

    /// ギャラリーから画像を選択
    ///
    /// # Returns
    ///
    /// 選択された画像。取り消された場合は `None`
    ///
    /// # Errors
    ///
    /// ピッカーが失敗した場合
    pub async fn from_gallery(
        &self,
        location: &Path,
    ) -> Result<Option<PendingSelection>, WorkflowError> {
        debug!("Opening image chooser at {}", location.display());
        let result = self.picker.pick_image(location).await;
        Self::settle("gallery", result)
    }

    /// カメラで撮影
    ///
    /// 撮影の前に必ず権限を確認し、拒否されていればカメラを起動しない。
    ///
    /// # Errors
    ///
    /// 権限が拒否された場合、または撮影が失敗した場合
    pub async fn from_camera(&self) -> Result<Option<PendingSelection>, WorkflowError> {
        if let PermissionStatus::Denied(reason) = self.permission.check().await {
            warn!("Camera permission denied: {}", reason);
            return Err(WorkflowError::PermissionDenied(reason));
        }

        let result = self.camera.capture().await;
        Self::settle("camera", result)
    }

    fn settle(
        source: &str,
        result: Result<PendingSelection, WorkflowError>,
    ) -> Result<Option<PendingSelection>, WorkflowError> {
        match result {
            Ok(selection) => {
                info!("Acquired image from {}: {}", source, selection.describe());
                Ok(Some(selection))
            }
            Err(WorkflowError::AcquisitionCancelled) => {
                info!("Image acquisition from {} cancelled", source);
                Ok(None)
            }
            Err(e) => {
                warn!("Image acquisition from {} failed: {}", source, e);
                Err(e)
            }
        }
    }
}
