//! Object Store Upload Repository Implementation
//!
//! ObjectStorageの`object_store`実装

use async_stream::stream;
use bytes::Bytes;
use log::{debug, warn};
use object_store::path::Path;
use object_store::{
    Attribute, AttributeValue, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    WriteMultipart,
};
use std::sync::Arc;

use crate::adapter::media::selection_reader::read_selection_bytes;
use crate::adapter::storage::client::StoreHandle;
use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::object_key::ObjectKey;
use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::entities::upload_event::{UploadEvent, UploadOutcome, UploadProgress};
use crate::domain::repositories::storage_repository::{ObjectStorage, UploadStream};

/// `object_store` ベースのアップロードリポジトリ
///
/// `chunk_size` 以下の画像は1回の `put`、それより大きい画像はマルチパートで送り、
/// パートが1つ完了するごとに進捗を流す。
pub struct ObjectStoreRepository {
    store: Arc<dyn ObjectStore>,
    base_url: String,
    supports_attributes: bool,
    prefix: String,
    chunk_size: usize,
}

impl ObjectStoreRepository {
    /// 新しいリポジトリを作成
    pub fn new(handle: StoreHandle, config: &UploadConfig) -> Self {
        Self {
            store: handle.store,
            base_url: handle.base_url,
            supports_attributes: handle.supports_attributes,
            prefix: config.object_prefix.clone(),
            chunk_size: config.chunk_size_bytes.max(1),
        }
    }

    /// キーに対応するストア内のパス
    pub fn object_path(&self, key: &ObjectKey) -> Path {
        Path::from(key.object_path(&self.prefix))
    }

    /// 画像の種類がわかれば Content-Type を付ける
    fn content_type_attributes(bytes: &[u8]) -> Attributes {
        let mut attributes = Attributes::new();
        if let Ok(format) = image::guess_format(bytes) {
            attributes.insert(
                Attribute::ContentType,
                AttributeValue::from(format.to_mime_type()),
            );
        }
        attributes
    }
}

impl ObjectStorage for ObjectStoreRepository {
    fn put_file(&self, key: &ObjectKey, selection: PendingSelection) -> UploadStream {
        let store = self.store.clone();
        let path = self.object_path(key);
        let chunk_size = self.chunk_size;
        let supports_attributes = self.supports_attributes;

        Box::pin(stream! {
            let bytes: Bytes = match read_selection_bytes(&selection).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    yield UploadEvent::failure(format!("{:#}", e));
                    return;
                }
            };
            if bytes.is_empty() {
                yield UploadEvent::failure("selected image is empty");
                return;
            }

            let total = bytes.len() as u64;
            yield UploadEvent::Progress(UploadProgress::ZERO);

            if bytes.len() <= chunk_size {
                debug!("Uploading {} ({} bytes) with a single put", path, total);
                let options = if supports_attributes {
                    PutOptions {
                        attributes: ObjectStoreRepository::content_type_attributes(&bytes),
                        ..Default::default()
                    }
                } else {
                    PutOptions::default()
                };
                match store.put_opts(&path, PutPayload::from(bytes), options).await {
                    Ok(_) => {
                        yield UploadEvent::Progress(UploadProgress::COMPLETE);
                        yield UploadEvent::Finished(UploadOutcome::Success);
                    }
                    Err(e) => yield UploadEvent::failure(e.to_string()),
                }
                return;
            }

            debug!(
                "Uploading {} ({} bytes) in parts of {} bytes",
                path, total, chunk_size
            );
            let upload = match store.put_multipart(&path).await {
                Ok(upload) => upload,
                Err(e) => {
                    yield UploadEvent::failure(e.to_string());
                    return;
                }
            };

            let mut writer = WriteMultipart::new_with_chunk_size(upload, chunk_size);
            let mut sent: u64 = 0;
            let mut failure = None;

            for part in bytes.chunks(chunk_size) {
                writer.write(part);
                // 送信中のパートがすべて完了するまで待つ
                if let Err(e) = writer.wait_for_capacity(0).await {
                    failure = Some(e.to_string());
                    break;
                }
                sent += part.len() as u64;
                // 最後の端数パートは finish まで送られない
                if sent < total {
                    yield UploadEvent::Progress(UploadProgress::from_bytes(sent, total));
                }
            }

            if let Some(reason) = failure {
                if let Err(e) = writer.abort().await {
                    warn!("Failed to abort multipart upload of {}: {}", path, e);
                }
                yield UploadEvent::failure(reason);
                return;
            }

            match writer.finish().await {
                Ok(_) => {
                    yield UploadEvent::Progress(UploadProgress::COMPLETE);
                    yield UploadEvent::Finished(UploadOutcome::Success);
                }
                Err(e) => yield UploadEvent::failure(e.to_string()),
            }
        })
    }

    fn location_of(&self, key: &ObjectKey) -> String {
        format!("{}/{}", self.base_url, key.object_path(&self.prefix))
    }
}
