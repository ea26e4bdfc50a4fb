//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **AcquireImageUseCase**: ギャラリー選択・カメラ撮影
//! - **RenderPreviewUseCase**: プレビュー表示
//! - **UploadImageUseCase**: アップロードと進捗・結果の中継

pub mod acquire_image;
pub mod render_preview;
pub mod upload_image;
