//! # Permission Repository Trait
//!
//! カメラ使用権限の確認を抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// 権限の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    /// 拒否（理由つき）
    Denied(String),
}

impl PermissionStatus {
    #[inline]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// カメラ権限
///
/// 撮影の前に毎回確認される
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CameraPermission: Send + Sync {
    async fn check(&self) -> PermissionStatus;
}
