//! Object Store Client Construction
//!
//! 設定からバックエンド（GCS / local / memory）を組み立てる

use anyhow::{Context, Result};
use log::info;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use std::fs;
use std::sync::Arc;

use crate::adapter::auth::resolve_service_account_path;
use crate::adapter::config::{Config, StorageBackend};

/// Built store plus the URL prefix used to describe object locations
///
/// `base_url` never ends with the `/` that joins it to an object path.
#[derive(Clone)]
pub struct StoreHandle {
    pub store: Arc<dyn ObjectStore>,
    pub base_url: String,
    /// Whether `put_opts` accepts object attributes (the local filesystem store does not)
    pub supports_attributes: bool,
}

impl StoreHandle {
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            base_url: "memory://".to_string(),
            supports_attributes: true,
        }
    }
}

/// Builds the object store selected by the config
///
/// Dry runs always use the in-memory store so nothing leaves the process.
pub fn build_object_store(config: &Config, dry_run: bool) -> Result<StoreHandle> {
    if dry_run {
        info!("Dry run: uploads go to an in-memory store");
        return Ok(StoreHandle::in_memory());
    }

    match config.backend {
        StorageBackend::Memory => Ok(StoreHandle::in_memory()),
        StorageBackend::Local => {
            let root = config
                .local_root
                .as_deref()
                .context("`local_root` is required for the local backend")?;
            let root = shellexpand::tilde(root).to_string();
            fs::create_dir_all(&root)
                .with_context(|| format!("Failed to create storage directory: {}", root))?;
            let root = fs::canonicalize(&root)
                .with_context(|| format!("Failed to resolve storage directory: {}", root))?;

            let store = LocalFileSystem::new_with_prefix(&root)
                .context("Failed to open local object store")?;
            info!("Using local object store at {}", root.display());

            let root = root.display().to_string();
            Ok(StoreHandle {
                store: Arc::new(store),
                base_url: format!("file://{}", root.trim_end_matches('/')),
                supports_attributes: false,
            })
        }
        StorageBackend::Gcs => build_gcs_store(config),
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
fn build_gcs_store(config: &Config) -> Result<StoreHandle> {
    let bucket = config
        .bucket
        .as_deref()
        .context("`bucket` is required for the gcs backend")?;

    let mut builder = GoogleCloudStorageBuilder::from_env().with_bucket_name(bucket);
    if let Some(key_path) = config.service_account_key_path.as_deref() {
        let key_path = resolve_service_account_path(key_path)?;
        builder = builder.with_service_account_path(key_path);
    }

    let store = builder
        .build()
        .context("Failed to create Google Cloud Storage client")?;
    info!("Using Google Cloud Storage bucket {}", bucket);

    Ok(StoreHandle {
        store: Arc::new(store),
        base_url: format!("gs://{}", bucket),
        supports_attributes: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dry_run_uses_memory() {
        let config = Config {
            backend: StorageBackend::Gcs,
            bucket: Some("bucket".to_string()),
            ..Config::default()
        };
        let handle = build_object_store(&config, true).unwrap();
        assert_eq!(handle.base_url, "memory://");
    }

    #[test]
    fn test_memory_backend() {
        let handle = build_object_store(&Config::default(), false).unwrap();
        assert_eq!(handle.base_url, "memory://");
        assert!(handle.supports_attributes);
    }

    #[test]
    fn test_local_backend_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("bucket");
        let config = Config {
            backend: StorageBackend::Local,
            local_root: Some(root.to_string_lossy().to_string()),
            ..Config::default()
        };

        let handle = build_object_store(&config, false).unwrap();

        assert!(root.is_dir());
        assert!(handle.base_url.starts_with("file://"));
        assert!(handle.base_url.ends_with("bucket"));
        assert!(!handle.supports_attributes);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_backend_at_filesystem_root() {
        let config = Config {
            backend: StorageBackend::Local,
            local_root: Some("/".to_string()),
            ..Config::default()
        };

        let handle = build_object_store(&config, false).unwrap();

        assert_eq!(handle.base_url, "file://");
    }

    #[test]
    fn test_gcs_missing_key_fails() {
        let config = Config {
            backend: StorageBackend::Gcs,
            bucket: Some("bucket".to_string()),
            service_account_key_path: Some("/nonexistent/key.json".to_string()),
            ..Config::default()
        };
        let err = build_object_store(&config, false).err().unwrap();
        assert!(err.to_string().contains("Service account key not found"));
    }
}
