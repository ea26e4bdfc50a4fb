//! # Upload Workflow
//!
//! 画像の取得から1回のアップロードまでを束ねるコンポーネント
//!
//! 選択中の画像（`PendingSelection`）はこの構造体だけが持つ。
//! アップロードは呼び出し時点の選択をコピーして別タスクで進むため、
//! 途中で新しい画像を選んでも進行中のアップロードには影響しない。

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::application::presenter::{Notice, UploadPresenter};
use crate::application::use_cases::acquire_image::AcquireImageUseCase;
use crate::application::use_cases::render_preview::RenderPreviewUseCase;
use crate::application::use_cases::upload_image::{UploadImageUseCase, UploadReport};
use crate::domain::entities::object_key::ObjectKey;
use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::errors::WorkflowError;
use crate::domain::repositories::media_repository::{CameraCapture, ImageDecoder, ImagePicker};
use crate::domain::repositories::permission_repository::CameraPermission;
use crate::domain::repositories::storage_repository::ObjectStorage;

/// ワークフローが使う外部コラボレーター一式
#[derive(Clone)]
pub struct Collaborators {
    pub picker: Arc<dyn ImagePicker>,
    pub camera: Arc<dyn CameraCapture>,
    pub permission: Arc<dyn CameraPermission>,
    pub decoder: Arc<dyn ImageDecoder>,
    pub storage: Arc<dyn ObjectStorage>,
    pub presenter: Arc<dyn UploadPresenter>,
}

/// 進行中のアップロードへのハンドル
pub struct UploadHandle {
    key: ObjectKey,
    join: JoinHandle<UploadReport>,
}

impl UploadHandle {
    /// このアップロードのキー
    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// 終端結果まで待つ
    ///
    /// # Errors
    ///
    /// アップロードタスクがパニックした場合
    pub async fn wait(self) -> Result<UploadReport> {
        self.join.await.context("Upload task failed")
    }
}

/// 進行中フラグを解放するガード
struct InFlightSlot(Arc<AtomicBool>);

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// アップロードワークフロー
pub struct UploadWorkflow {
    acquire: AcquireImageUseCase<dyn ImagePicker, dyn CameraCapture, dyn CameraPermission>,
    preview: RenderPreviewUseCase<dyn ImageDecoder, dyn UploadPresenter>,
    upload: UploadImageUseCase<dyn ObjectStorage, dyn UploadPresenter>,
    presenter: Arc<dyn UploadPresenter>,
    pending: Option<PendingSelection>,
    in_flight: Arc<AtomicBool>,
}

impl UploadWorkflow {
    /// 依存を注入してワークフローを作成
    pub fn new(collaborators: Collaborators) -> Self {
        let Collaborators {
            picker,
            camera,
            permission,
            decoder,
            storage,
            presenter,
        } = collaborators;

        Self {
            acquire: AcquireImageUseCase::new(picker, camera, permission),
            preview: RenderPreviewUseCase::new(decoder, presenter.clone()),
            upload: UploadImageUseCase::new(storage, presenter.clone()),
            presenter,
            pending: None,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// 選択中の画像
    pub fn pending(&self) -> Option<&PendingSelection> {
        self.pending.as_ref()
    }

    /// アップロードが進行中かどうか
    pub fn is_uploading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// ギャラリーから画像を選ぶ
    ///
    /// # Returns
    ///
    /// 新しい画像が選択された場合に `true`。取り消し時は `false` で、選択は変わらない
    ///
    /// # Errors
    ///
    /// ピッカーが失敗した場合（表示層にも通知する）
    pub async fn acquire_from_gallery(&mut self, location: &Path) -> Result<bool, WorkflowError> {
        let acquired = self.acquire.from_gallery(location).await;
        self.accept(acquired).await
    }

    /// カメラで撮影する
    ///
    /// # Errors
    ///
    /// 権限が拒否された場合、または撮影が失敗した場合（表示層にも通知する）
    pub async fn acquire_from_camera(&mut self) -> Result<bool, WorkflowError> {
        let acquired = self.acquire.from_camera().await;
        self.accept(acquired).await
    }

    /// プレビューを表示する（失敗してもエラーにしない）
    pub async fn render_preview(&self, selection: &PendingSelection) -> bool {
        self.preview.execute(selection).await
    }

    /// 選択中の画像のアップロードを開始する
    ///
    /// 選択がない場合は何もせず `Ok(None)` を返す。
    /// インジケーター表示とキー生成はこの呼び出しの中で行い、転送は別タスクで進む。
    ///
    /// # Errors
    ///
    /// 別のアップロードが進行中の場合は `WorkflowError::UploadInFlight`
    ///
    /// # Panics
    ///
    /// tokio ランタイムの外から呼ばれた場合
    pub fn trigger_upload(&self) -> Result<Option<UploadHandle>, WorkflowError> {
        let Some(selection) = self.pending.clone() else {
            debug!("Upload requested with no pending selection; skipping");
            return Ok(None);
        };

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!("Upload requested while another upload is running; rejected");
            return Err(self.report(WorkflowError::UploadInFlight));
        }
        let slot = InFlightSlot(self.in_flight.clone());

        let task = self.upload.begin(selection);
        let key = task.key().clone();
        let join = tokio::spawn(async move {
            let _slot = slot;
            task.run().await
        });

        Ok(Some(UploadHandle { key, join }))
    }

    async fn accept(
        &mut self,
        acquired: Result<Option<PendingSelection>, WorkflowError>,
    ) -> Result<bool, WorkflowError> {
        let selection = match acquired {
            Ok(Some(selection)) => selection,
            Ok(None) => return Ok(false),
            Err(e) => return Err(self.report(e)),
        };

        if self.is_uploading() {
            info!("Replacing pending selection; the running upload keeps its own image");
        }
        self.pending = Some(selection.clone());
        self.preview.execute(&selection).await;

        Ok(true)
    }

    fn report(&self, error: WorkflowError) -> WorkflowError {
        self.presenter.notify(&Notice::Error(error.to_string()));
        error
    }
}
