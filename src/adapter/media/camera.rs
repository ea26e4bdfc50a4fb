//! Command Camera
//!
//! CameraCaptureの外部コマンド実装（`fswebcam`, `libcamera-still` など）

use async_trait::async_trait;
use log::{debug, info};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::process::Command;
use uuid::Uuid;

use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::errors::WorkflowError;
use crate::domain::repositories::media_repository::CameraCapture;

/// Placeholder replaced by the capture file path in command arguments
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// 外部コマンドで撮影するカメラ
///
/// コマンドは `{output}` に書き出す。引数に `{output}` がなければ末尾に付け足す。
pub struct CommandCamera {
    command: Vec<String>,
    output_dir: PathBuf,
}

impl CommandCamera {
    pub fn new(command: Vec<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            output_dir: output_dir.into(),
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("capture-{}.jpg", Uuid::new_v4()))
    }

    /// 引数の `{output}` を置き換える
    fn build_args(args: &[String], output: &str) -> Vec<String> {
        let mut built: Vec<String> = args
            .iter()
            .map(|arg| arg.replace(OUTPUT_PLACEHOLDER, output))
            .collect();
        if !args.iter().any(|arg| arg.contains(OUTPUT_PLACEHOLDER)) {
            built.push(output.to_string());
        }
        built
    }
}

#[async_trait]
impl CameraCapture for CommandCamera {
    async fn capture(&self) -> Result<PendingSelection, WorkflowError> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            WorkflowError::AcquisitionFailed("no camera command configured".to_string())
        })?;

        let output = self.output_path();
        let args = Self::build_args(args, &output.to_string_lossy());
        debug!("Running camera command: {} {:?}", program, args);

        let result = Command::new(program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                WorkflowError::AcquisitionFailed(format!("failed to launch {}: {}", program, e))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(WorkflowError::AcquisitionFailed(format!(
                "{} exited with {}: {}",
                program,
                result.status,
                stderr.trim()
            )));
        }

        match tokio::fs::read(&output).await {
            Ok(bytes) if bytes.is_empty() => {
                info!("Camera produced an empty frame; treating as cancelled");
                Err(WorkflowError::AcquisitionCancelled)
            }
            Ok(bytes) => {
                info!("Captured {} bytes to {}", bytes.len(), output.display());
                Ok(PendingSelection::captured(bytes, Some(output)))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Camera produced no frame; treating as cancelled");
                Err(WorkflowError::AcquisitionCancelled)
            }
            Err(e) => Err(WorkflowError::AcquisitionFailed(format!(
                "failed to read {}: {}",
                output.display(),
                e
            ))),
        }
    }
}
