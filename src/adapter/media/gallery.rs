//! Gallery Image Picker
//!
//! ImagePickerのファイルシステム実装

use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::errors::WorkflowError;
use crate::domain::repositories::media_repository::ImagePicker;

/// Lets the user choose one entry from a list of images
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Chooser: Send + Sync {
    /// Returns the chosen index, or `None` when the user backs out
    async fn choose(&self, candidates: &[PathBuf]) -> Option<usize>;
}

/// Whether the path has an image file extension
pub fn is_image_path(path: &Path) -> bool {
    image::ImageFormat::from_path(path)
        .map(|format| format.reading_enabled())
        .unwrap_or(false)
}

/// Lists image files under `root`, sorted by path
pub fn list_gallery_images(root: &Path) -> Vec<PathBuf> {
    let mut images: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file() && is_image_path(entry.path()))
        .map(|entry| entry.into_path())
        .collect();
    images.sort();
    images
}

/// ファイルシステム上の画像を選ぶピッカー
///
/// ファイルを渡すとそれを選択し、ディレクトリを渡すと中の画像一覧から選ばせる。
pub struct FileImagePicker {
    chooser: Arc<dyn Chooser>,
}

impl FileImagePicker {
    pub fn new(chooser: Arc<dyn Chooser>) -> Self {
        Self { chooser }
    }
}

#[async_trait]
impl ImagePicker for FileImagePicker {
    async fn pick_image(&self, location: &Path) -> Result<PendingSelection, WorkflowError> {
        let location = PathBuf::from(shellexpand::tilde(&location.to_string_lossy()).as_ref());

        if location.is_file() {
            if !is_image_path(&location) {
                // 画像以外は選択肢に出ないので、選ばずに閉じたのと同じ扱い
                warn!("Not an image file: {}", location.display());
                return Err(WorkflowError::AcquisitionCancelled);
            }
            return Ok(PendingSelection::from_path(location));
        }

        if !location.is_dir() {
            return Err(WorkflowError::AcquisitionFailed(format!(
                "no such file or directory: {}",
                location.display()
            )));
        }

        let root = location.clone();
        let images = tokio::task::spawn_blocking(move || list_gallery_images(&root))
            .await
            .map_err(|e| {
                WorkflowError::AcquisitionFailed(format!("Failed to spawn blocking task: {}", e))
            })?;

        if images.is_empty() {
            info!("No images found in {}", location.display());
            return Err(WorkflowError::AcquisitionCancelled);
        }
        debug!("Found {} images in {}", images.len(), location.display());

        match self.chooser.choose(&images).await {
            Some(index) => images
                .get(index)
                .cloned()
                .map(PendingSelection::from_path)
                .ok_or(WorkflowError::AcquisitionCancelled),
            None => Err(WorkflowError::AcquisitionCancelled),
        }
    }
}
