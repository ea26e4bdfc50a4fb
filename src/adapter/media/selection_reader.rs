//! Selection Reader
//!
//! 選択された画像のバイト列を取り出す

use anyhow::{Context, Result};
use bytes::Bytes;

use crate::domain::entities::pending_selection::PendingSelection;

/// Returns the image bytes behind a selection
///
/// Captured frames are already in memory; file references are read from disk.
pub async fn read_selection_bytes(selection: &PendingSelection) -> Result<Bytes> {
    match selection {
        PendingSelection::CapturedFrame { bytes, .. } => Ok(bytes.clone()),
        PendingSelection::ContentRef(path) => {
            let data = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read image: {}", path.display()))?;
            Ok(Bytes::from(data))
        }
    }
}
