//! Image Crate Decoder
//!
//! ImageDecoderの`image`クレート実装

use async_trait::async_trait;
use bytes::Bytes;
use image::DynamicImage;
use log::debug;

use crate::adapter::media::selection_reader::read_selection_bytes;
use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::entities::preview::Preview;
use crate::domain::errors::WorkflowError;
use crate::domain::repositories::media_repository::ImageDecoder;

/// `image` クレートでデコードし、表示用サムネイルを作るデコーダー
pub struct ImageCrateDecoder {
    max_dimension: u32,
}

impl ImageCrateDecoder {
    pub fn new(max_dimension: u32) -> Self {
        Self {
            max_dimension: max_dimension.max(1),
        }
    }

    fn decode_bytes(bytes: &Bytes, max_dimension: u32) -> Result<Preview, WorkflowError> {
        let format = image::guess_format(bytes)
            .ok()
            .map(|format| format!("{:?}", format));
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| WorkflowError::Decode(e.to_string()))?;

        let (width, height) = (decoded.width(), decoded.height());
        let thumbnail: DynamicImage = if width <= max_dimension && height <= max_dimension {
            decoded
        } else {
            decoded.thumbnail(max_dimension, max_dimension)
        };
        let rgba = thumbnail.to_rgba8();

        Ok(Preview {
            width,
            height,
            format,
            thumbnail_width: rgba.width(),
            thumbnail_height: rgba.height(),
            thumbnail: rgba.into_raw(),
        })
    }
}

#[async_trait]
impl ImageDecoder for ImageCrateDecoder {
    async fn decode(&self, selection: &PendingSelection) -> Result<Preview, WorkflowError> {
        let bytes = read_selection_bytes(selection)
            .await
            .map_err(|e| WorkflowError::Decode(format!("{:#}", e)))?;

        let max_dimension = self.max_dimension;
        let preview =
            tokio::task::spawn_blocking(move || Self::decode_bytes(&bytes, max_dimension))
                .await
                .map_err(|e| {
                    WorkflowError::Decode(format!("Failed to spawn blocking task: {}", e))
                })??;

        debug!(
            "Decoded {} into a {}x{} preview",
            selection.describe(),
            preview.thumbnail_width,
            preview.thumbnail_height
        );
        Ok(preview)
    }
}
