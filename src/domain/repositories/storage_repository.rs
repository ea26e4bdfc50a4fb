//! # Storage Repository Trait
//!
//! リモートのオブジェクトストレージへのアップロードを抽象化

use futures::stream::BoxStream;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::object_key::ObjectKey;
use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::entities::upload_event::UploadEvent;

/// アップロードイベントのストリーム
///
/// 0個以上の `UploadEvent::Progress` の後に、1つの `UploadEvent::Finished` が続く。
pub type UploadStream = BoxStream<'static, UploadEvent>;

/// オブジェクトストレージ
#[cfg_attr(test, automock)]
pub trait ObjectStorage: Send + Sync {
    /// 選択された画像を `key` の下に書き込む
    ///
    /// ストリームはポーリングされるまで転送を始めない。
    fn put_file(&self, key: &ObjectKey, selection: PendingSelection) -> UploadStream;

    /// `key` に対応するオブジェクトの場所（例: `gs://bucket/images/<key>`）
    fn location_of(&self, key: &ObjectKey) -> String;
}
