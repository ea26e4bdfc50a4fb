//! Object Storage Adapter Modules
//!
//! `object_store` クレートを使ったアップロードの実装

pub mod client;
pub mod object_store_repository;

pub use client::{build_object_store, StoreHandle};
pub use object_store_repository::ObjectStoreRepository;
