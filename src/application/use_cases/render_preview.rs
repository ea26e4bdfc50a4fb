//! # Render Preview Use Case
//!
//! プレビュー表示ユースケース

use log::{info, warn};
use std::sync::Arc;

use crate::application::presenter::UploadPresenter;
use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::repositories::media_repository::ImageDecoder;

/// プレビュー表示ユースケース
///
/// デコードに失敗してもエラーにはせず、ログに残してプレビューを出さないだけにする。
pub struct RenderPreviewUseCase<D, P>
where
    D: ImageDecoder + ?Sized,
    P: UploadPresenter + ?Sized,
{
    decoder: Arc<D>,
    presenter: Arc<P>,
}

impl<D, P> RenderPreviewUseCase<D, P>
where
    D: ImageDecoder + ?Sized,
    P: UploadPresenter + ?Sized,
{
    pub fn new(decoder: Arc<D>, presenter: Arc<P>) -> Self {
        Self { decoder, presenter }
    }

    /// プレビューを表示する
    ///
    /// # Returns
    ///
    /// プレビューを表示できた場合に `true`
    pub async fn execute(&self, selection: &PendingSelection) -> bool {
        match self.decoder.decode(selection).await {
            Ok(preview) => {
                info!(
                    "Rendering preview for {}: {}",
                    selection.describe(),
                    preview.summary()
                );
                self.presenter.show_preview(&preview);
                true
            }
            Err(e) => {
                warn!("No preview for {}: {}", selection.describe(), e);
                false
            }
        }
    }
}
