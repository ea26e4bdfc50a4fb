//! # Domain Layer
//!
//! 画像アップロードの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - I/Oを持たない（ファイル・ネットワーク・端末には触れない）
//! - ストレージSDKやカメラの実装について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: PendingSelection, ObjectKey, UploadProgress などの値
//! - **errors**: ワークフローのエラー分類
//! - **repositories**: 外部コラボレーターのtrait（インターフェース定義のみ）
//! - **services**: Domain Service（進捗の単調性など）

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
