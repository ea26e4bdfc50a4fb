//! # Preview
//!
//! 画面に表示するためにデコードされた画像

/// デコード済みプレビュー
///
/// 元画像の寸法と、表示用に縮小したRGBA8サムネイルを持つ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    /// 元画像の幅
    pub width: u32,
    /// 元画像の高さ
    pub height: u32,
    /// 検出された画像フォーマット（例: "Jpeg"）
    pub format: Option<String>,
    pub thumbnail_width: u32,
    pub thumbnail_height: u32,
    /// RGBA8 のピクセル列
    pub thumbnail: Vec<u8>,
}

impl Preview {
    /// 表示用の1行サマリー
    pub fn summary(&self) -> String {
        match &self.format {
            Some(format) => format!("{}x{} ({})", self.width, self.height, format),
            None => format!("{}x{}", self.width, self.height),
        }
    }
}
