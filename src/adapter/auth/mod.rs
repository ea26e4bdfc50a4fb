//! Authentication Module
//!
//! GCP認証関連の機能

pub mod gcp_auth;

pub use gcp_auth::resolve_service_account_path;
