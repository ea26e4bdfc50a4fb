//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

use crate::domain::entities::object_key::DEFAULT_OBJECT_PREFIX;

/// 1回の `put` で送る最大サイズ（これを超えるとマルチパート）
pub const DEFAULT_CHUNK_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// プレビューの長辺の最大ピクセル数
pub const DEFAULT_PREVIEW_MAX_DIMENSION: u32 = 256;

/// アップロード設定
///
/// ストレージとプレビューのアダプターを組み立てるのに必要な値
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// オブジェクトパスの接頭辞（例: "images"）
    pub object_prefix: String,
    /// マルチパートの1パートのサイズ
    pub chunk_size_bytes: usize,
    /// プレビューの長辺の最大ピクセル数
    pub preview_max_dimension: u32,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// `chunk_size_bytes` と `preview_max_dimension` は0の場合1に切り上げる。
    ///
    /// # 例
    ///
    /// ```
    /// use photolift::application::dto::upload_config::UploadConfig;
    ///
    /// let config = UploadConfig::new("images".to_string(), 8 * 1024 * 1024, 512);
    ///
    /// assert_eq!(config.object_prefix, "images");
    /// assert_eq!(config.chunk_size_bytes, 8 * 1024 * 1024);
    /// assert_eq!(config.preview_max_dimension, 512);
    /// ```
    pub fn new(object_prefix: String, chunk_size_bytes: usize, preview_max_dimension: u32) -> Self {
        Self {
            object_prefix,
            chunk_size_bytes: chunk_size_bytes.max(1),
            preview_max_dimension: preview_max_dimension.max(1),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_OBJECT_PREFIX.to_string(),
            DEFAULT_CHUNK_SIZE_BYTES,
            DEFAULT_PREVIEW_MAX_DIMENSION,
        )
    }
}
