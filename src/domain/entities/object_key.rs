//! # ObjectKey Value Object
//!
//! アップロード1回ごとに生成されるリモートストレージ上のキー

use std::fmt;
use uuid::Uuid;

/// デフォルトのオブジェクトパス接頭辞
pub const DEFAULT_OBJECT_PREFIX: &str = "images";

/// オブジェクトキー
///
/// ランダムなUUID v4文字列。アップロード試行ごとに1度だけ生成し、再利用しない。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// 新しい一意なキーを生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// キー文字列を返す
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 接頭辞付きのオブジェクトパスを返す
    ///
    /// ```
    /// use photolift::domain::entities::object_key::ObjectKey;
    ///
    /// let key = ObjectKey::generate();
    /// assert_eq!(key.object_path("images"), format!("images/{}", key));
    /// assert_eq!(key.object_path("/images/"), format!("images/{}", key));
    /// assert_eq!(key.object_path(""), key.to_string());
    /// ```
    pub fn object_path(&self, prefix: &str) -> String {
        let prefix = prefix.trim_matches('/');
        if prefix.is_empty() {
            self.0.clone()
        } else {
            format!("{}/{}", prefix, self.0)
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_is_uuid() {
        let key = ObjectKey::generate();
        assert!(Uuid::parse_str(key.as_str()).is_ok());
    }

    #[test]
    fn test_generate_distinct() {
        let keys: HashSet<ObjectKey> = (0..1000).map(|_| ObjectKey::generate()).collect();
        assert_eq!(keys.len(), 1000);
    }

    #[test]
    fn test_object_path_default_prefix() {
        let key = ObjectKey::generate();
        let path = key.object_path(DEFAULT_OBJECT_PREFIX);
        assert!(path.starts_with("images/"));
        assert!(path.ends_with(key.as_str()));
    }

    #[test]
    fn test_object_path_nested_prefix() {
        let key = ObjectKey::generate();
        assert_eq!(
            key.object_path("users/alice/"),
            format!("users/alice/{}", key)
        );
    }
}
