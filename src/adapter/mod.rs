//! Adapter Layer
//!
//! 外部システム（オブジェクトストレージ, ファイルシステム, カメラ, 端末）との統合

pub mod auth;
pub mod config;
pub mod media;
pub mod presenter;
pub mod storage;
