//! # PendingSelection Value Object
//!
//! ユーザーが選択・撮影した、まだアップロードされていない画像への参照

use bytes::Bytes;
use std::path::{Path, PathBuf};

/// アップロード待ちの画像
///
/// ギャラリーから選んだ場合はファイル参照、カメラで撮影した場合は
/// メモリ上のフレーム（と、あれば元ファイルの参照）を保持する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingSelection {
    /// ローカルにある画像ファイルへの参照
    ContentRef(PathBuf),
    /// カメラで撮影したフレーム
    CapturedFrame {
        bytes: Bytes,
        content_ref: Option<PathBuf>,
    },
}

impl PendingSelection {
    /// ファイル参照から選択を作成
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::ContentRef(path.into())
    }

    /// 撮影済みフレームから選択を作成
    pub fn captured(bytes: impl Into<Bytes>, content_ref: Option<PathBuf>) -> Self {
        Self::CapturedFrame {
            bytes: bytes.into(),
            content_ref,
        }
    }

    /// 元ファイルの参照を返す（メモリのみのフレームでは `None`）
    pub fn content_ref(&self) -> Option<&Path> {
        match self {
            Self::ContentRef(path) => Some(path),
            Self::CapturedFrame { content_ref, .. } => content_ref.as_deref(),
        }
    }

    /// カメラ由来かどうか
    #[inline]
    pub fn is_captured(&self) -> bool {
        matches!(self, Self::CapturedFrame { .. })
    }

    /// ログ出力用の短い説明
    pub fn describe(&self) -> String {
        match self {
            Self::ContentRef(path) => path.display().to_string(),
            Self::CapturedFrame {
                bytes,
                content_ref: Some(path),
            } => format!("captured frame ({} bytes, {})", bytes.len(), path.display()),
            Self::CapturedFrame {
                bytes,
                content_ref: None,
            } => format!("captured frame ({} bytes)", bytes.len()),
        }
    }
}
