//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **PendingSelection**: アップロード待ちの画像参照
//! - **ObjectKey**: 1回のアップロードに割り当てる一意なキー
//! - **UploadEvent**: 進捗と終端結果のイベント
//! - **Preview**: デコード済みのプレビュー画像

pub mod object_key;
pub mod pending_selection;
pub mod preview;
pub mod upload_event;
