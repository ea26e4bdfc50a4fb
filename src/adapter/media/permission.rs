//! Device Permission
//!
//! CameraPermissionの実装。カメラのデバイスノードを読み取りで開けるかを確認する

use async_trait::async_trait;
use log::debug;
use std::fs::File;
use std::path::PathBuf;

use crate::domain::repositories::permission_repository::{CameraPermission, PermissionStatus};

/// デバイスノードによる権限確認
///
/// デバイスが設定されていなければ常に許可する。
pub struct DevicePermission {
    device: Option<PathBuf>,
}

impl DevicePermission {
    pub fn new(device: Option<PathBuf>) -> Self {
        Self { device }
    }
}

#[async_trait]
impl CameraPermission for DevicePermission {
    async fn check(&self) -> PermissionStatus {
        let Some(device) = self.device.clone() else {
            return PermissionStatus::Granted;
        };

        let result = tokio::task::spawn_blocking(move || {
            File::open(&device)
                .map(|_| ())
                .map_err(|e| format!("{}: {}", device.display(), e))
        })
        .await;

        match result {
            Ok(Ok(())) => PermissionStatus::Granted,
            Ok(Err(reason)) => {
                debug!("Camera permission check failed: {}", reason);
                PermissionStatus::Denied(reason)
            }
            Err(e) => PermissionStatus::Denied(format!("permission check failed: {}", e)),
        }
    }
}
