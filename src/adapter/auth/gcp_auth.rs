//! GCP Authentication
//!
//! サービスアカウント鍵のパス解決

use anyhow::{bail, Result};
use std::path::Path;

/// Expands tilde in path and returns the full path
pub fn expand_key_path(key_path: &str) -> String {
    shellexpand::tilde(key_path).to_string()
}

/// Resolves the service account key path used by the GCS client
///
/// The key file must exist; a missing key is reported here instead of on the
/// first upload.
pub fn resolve_service_account_path(key_path: &str) -> Result<String> {
    let expanded = expand_key_path(key_path);
    if !Path::new(&expanded).is_file() {
        bail!("Service account key not found: {}", expanded);
    }
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_expand_key_path_with_tilde() {
        // プラットフォーム別のホームディレクトリ環境変数取得
        #[cfg(unix)]
        let home = std::env::var("HOME")
            .expect("HOME environment variable should be set on Unix systems");

        #[cfg(windows)]
        let home = std::env::var("USERPROFILE")
            .expect("USERPROFILE environment variable should be set on Windows");

        let result = expand_key_path("~/.photolift/key.json");
        let expected = format!("{}/.photolift/key.json", home);

        #[cfg(unix)]
        assert_eq!(result, expected);

        #[cfg(windows)]
        assert_eq!(result.replace('\\', "/"), expected.replace('\\', "/"));
    }

    #[test]
    fn test_expand_key_path_absolute() {
        let result = expand_key_path("/absolute/path/key.json");
        assert_eq!(result, "/absolute/path/key.json");
    }

    #[test]
    fn test_resolve_existing_key() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(resolve_service_account_path(path).unwrap(), path);
    }

    #[test]
    fn test_resolve_missing_key() {
        let err = resolve_service_account_path("/nonexistent/photolift/key.json").unwrap_err();
        assert!(err.to_string().contains("Service account key not found"));
    }
}
