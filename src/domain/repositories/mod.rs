//! # Domain Repositories
//!
//! 外部コラボレーター（画像ピッカー・カメラ・権限・ストレージ）のtrait定義
//!
//! ## 特徴
//!
//! - Domain層では実装を持たない（traitの定義のみ）
//! - Adapter層で具体的な実装を提供
//! - 依存性逆転の原則（DIP）を実現

pub mod media_repository;
pub mod permission_repository;
pub mod storage_repository;
