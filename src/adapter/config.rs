//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::application::dto::upload_config::{
    UploadConfig, DEFAULT_CHUNK_SIZE_BYTES, DEFAULT_PREVIEW_MAX_DIMENSION,
};
use crate::domain::entities::object_key::DEFAULT_OBJECT_PREFIX;

/// ストレージのバックエンド
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Google Cloud Storage（Firebase Storage のバケットを含む）
    Gcs,
    /// ローカルディレクトリ
    Local,
    /// プロセス内メモリ
    #[default]
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub bucket: Option<String>,
    #[serde(default)]
    pub service_account_key_path: Option<String>,
    #[serde(default)]
    pub local_root: Option<String>,
    #[serde(default = "default_object_prefix")]
    pub object_prefix: String,
    #[serde(default = "default_chunk_size_bytes")]
    pub chunk_size_bytes: usize,

    // Camera
    #[serde(default)]
    pub camera_command: Vec<String>,
    #[serde(default)]
    pub camera_device: Option<String>,

    #[serde(default = "default_preview_max_dimension")]
    pub preview_max_dimension: u32,
}

fn default_object_prefix() -> String {
    DEFAULT_OBJECT_PREFIX.to_string()
}

fn default_chunk_size_bytes() -> usize {
    DEFAULT_CHUNK_SIZE_BYTES
}

fn default_preview_max_dimension() -> u32 {
    DEFAULT_PREVIEW_MAX_DIMENSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            bucket: None,
            service_account_key_path: None,
            local_root: None,
            object_prefix: default_object_prefix(),
            chunk_size_bytes: default_chunk_size_bytes(),
            camera_command: Vec::new(),
            camera_device: None,
            preview_max_dimension: default_preview_max_dimension(),
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// 設定ファイルが無ければデフォルト（メモリバックエンド）を使う
    pub fn load_or_default(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            warn!(
                "Config file {} not found; using in-memory storage defaults",
                path
            );
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// バックエンドごとの必須項目を確認
    pub fn validate(&self) -> Result<()> {
        match self.backend {
            StorageBackend::Gcs => {
                if self.bucket.as_deref().map_or(true, str::is_empty) {
                    bail!("`bucket` is required for the gcs backend");
                }
            }
            StorageBackend::Local => {
                if self.local_root.as_deref().map_or(true, str::is_empty) {
                    bail!("`local_root` is required for the local backend");
                }
            }
            StorageBackend::Memory => {}
        }
        if self.chunk_size_bytes == 0 {
            bail!("`chunk_size_bytes` must be greater than zero");
        }
        if self.preview_max_dimension == 0 {
            bail!("`preview_max_dimension` must be greater than zero");
        }
        Ok(())
    }

    /// アップロード設定のDTOに変換
    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig::new(
            self.object_prefix.clone(),
            self.chunk_size_bytes,
            self.preview_max_dimension,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_gcs_config() {
        let file = write_config(
            r#"{
  "backend": "gcs",
  "bucket": "amdoc-images.appspot.com",
  "service_account_key_path": "~/.photolift/key.json",
  "camera_command": ["fswebcam", "--no-banner", "{output}"],
  "camera_device": "/dev/video0"
}"#,
        );

        let config = Config::load(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.backend, StorageBackend::Gcs);
        assert_eq!(config.bucket.as_deref(), Some("amdoc-images.appspot.com"));
        assert_eq!(config.object_prefix, "images");
        assert_eq!(config.chunk_size_bytes, DEFAULT_CHUNK_SIZE_BYTES);
        assert_eq!(config.camera_command.len(), 3);
        assert_eq!(config.camera_device.as_deref(), Some("/dev/video0"));
        assert_eq!(config.preview_max_dimension, 256);
    }

    #[test]
    fn test_load_empty_object_is_memory_default() {
        let file = write_config("{}");
        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_gcs_requires_bucket() {
        let file = write_config(r#"{"backend": "gcs"}"#);
        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("bucket"));
    }

    #[test]
    fn test_local_requires_root() {
        let file = write_config(r#"{"backend": "local", "local_root": ""}"#);
        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("local_root"));
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let file = write_config(r#"{"chunk_size_bytes": 0}"#);
        assert!(Config::load(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let file = write_config(r#"{"backend": "ftp"}"#);
        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");
        let config = Config::load_or_default(path.to_str().unwrap()).unwrap();
        assert_eq!(config.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_upload_config_conversion() {
        let config = Config {
            object_prefix: "uploads".to_string(),
            chunk_size_bytes: 1024,
            preview_max_dimension: 64,
            ..Config::default()
        };
        let upload_config = config.upload_config();
        assert_eq!(upload_config.object_prefix, "uploads");
        assert_eq!(upload_config.chunk_size_bytes, 1024);
        assert_eq!(upload_config.preview_max_dimension, 64);
    }
}
