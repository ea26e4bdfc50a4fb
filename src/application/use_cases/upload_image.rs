//! # Upload Image Use Case
//!
//! 画像アップロードユースケース
//!
//! インジケーター表示 → キー生成 → 転送開始、の順で準備し（`begin`）、
//! ストレージからのイベントを表示層へ中継する（`UploadTask::run`）。

use futures::StreamExt;
use log::{debug, info, warn};
use std::sync::Arc;

use crate::application::presenter::{Notice, UploadPresenter};
use crate::domain::entities::object_key::ObjectKey;
use crate::domain::entities::pending_selection::PendingSelection;
use crate::domain::entities::upload_event::{UploadEvent, UploadOutcome, UploadProgress};
use crate::domain::repositories::storage_repository::{ObjectStorage, UploadStream};
use crate::domain::services::progress_tracker::ProgressTracker;

/// インジケーターのタイトル
pub const INDICATOR_TITLE: &str = "Uploading...";

/// 終端イベントが来ないままストリームが終わった場合の失敗理由
pub const MISSING_OUTCOME_REASON: &str = "upload ended without a result";

/// アップロード1回分の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// このアップロードに割り当てたキー
    pub key: ObjectKey,
    /// オブジェクトの場所
    pub location: String,
    /// 終端結果
    pub outcome: UploadOutcome,
    /// 表示層に中継した進捗
    pub progress: Vec<UploadProgress>,
}

/// 表示中のインジケーター
///
/// `dismiss` されずに破棄された場合も閉じる。閉じるのは常に1回だけ。
struct IndicatorGuard<P: UploadPresenter + ?Sized> {
    presenter: Arc<P>,
    active: bool,
}

impl<P: UploadPresenter + ?Sized> IndicatorGuard<P> {
    fn show(presenter: Arc<P>, title: &str) -> Self {
        presenter.show_indicator(title);
        Self {
            presenter,
            active: true,
        }
    }

    fn dismiss(mut self) {
        self.close();
    }

    fn close(&mut self) {
        if self.active {
            self.active = false;
            self.presenter.dismiss_indicator();
        }
    }
}

impl<P: UploadPresenter + ?Sized> Drop for IndicatorGuard<P> {
    fn drop(&mut self) {
        self.close();
    }
}

/// 開始済みのアップロード
pub struct UploadTask<P: UploadPresenter + ?Sized> {
    key: ObjectKey,
    location: String,
    events: UploadStream,
    indicator: IndicatorGuard<P>,
    presenter: Arc<P>,
}

impl<P: UploadPresenter + ?Sized> UploadTask<P> {
    pub fn key(&self) -> &ObjectKey {
        &self.key
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// 終端結果までイベントを中継する
    ///
    /// 進捗は非減少のものだけを表示し、最初の終端イベントで打ち切る。
    pub async fn run(self) -> UploadReport {
        let UploadTask {
            key,
            location,
            mut events,
            indicator,
            presenter,
        } = self;

        let mut tracker = ProgressTracker::new();
        let mut progress = Vec::new();
        let mut outcome = None;

        while let Some(event) = events.next().await {
            match event {
                UploadEvent::Progress(value) => match tracker.observe(value) {
                    Some(value) => {
                        debug!("Upload {} progress: {}", key, value);
                        presenter.show_progress(value);
                        progress.push(value);
                    }
                    None => debug!("Upload {} progress went backwards: {}", key, value),
                },
                UploadEvent::Finished(result) => {
                    outcome = Some(result);
                    break;
                }
            }
        }

        let outcome = outcome.unwrap_or_else(|| {
            warn!("Upload {} stream ended without an outcome", key);
            UploadOutcome::Failure(MISSING_OUTCOME_REASON.to_string())
        });

        indicator.dismiss();

        match &outcome {
            UploadOutcome::Success => {
                info!("Uploaded {}", location);
                presenter.notify(&Notice::Uploaded {
                    location: location.clone(),
                });
            }
            UploadOutcome::Failure(reason) => {
                warn!("Upload to {} failed: {}", location, reason);
                presenter.notify(&Notice::UploadFailed {
                    reason: reason.clone(),
                });
            }
        }

        UploadReport {
            key,
            location,
            outcome,
            progress,
        }
    }
}

/// 画像アップロードユースケース
pub struct UploadImageUseCase<S, P>
where
    S: ObjectStorage + ?Sized,
    P: UploadPresenter + ?Sized,
{
    storage: Arc<S>,
    presenter: Arc<P>,
}

impl<S, P> UploadImageUseCase<S, P>
where
    S: ObjectStorage + ?Sized,
    P: UploadPresenter + ?Sized,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `storage` - オブジェクトストレージ
    /// * `presenter` - 表示層
    pub fn new(storage: Arc<S>, presenter: Arc<P>) -> Self {
        Self { storage, presenter }
    }

    /// アップロードを開始する
    ///
    /// インジケーターを表示し、新しいキーを生成してストリームを用意する。
    /// 転送は返された `UploadTask` を `run` したときに進む。
    pub fn begin(&self, selection: PendingSelection) -> UploadTask<P> {
        let indicator = IndicatorGuard::show(self.presenter.clone(), INDICATOR_TITLE);
        let key = ObjectKey::generate();
        let location = self.storage.location_of(&key);

        info!("Uploading {} to {}", selection.describe(), location);
        let events = self.storage.put_file(&key, selection);

        UploadTask {
            key,
            location,
            events,
            indicator,
            presenter: self.presenter.clone(),
        }
    }

    /// アップロードして終端結果まで待つ
    pub async fn execute(&self, selection: PendingSelection) -> UploadReport {
        self.begin(selection).run().await
    }
}
