//! Workflow Integration Tests
//!
//! 実際のアダプター（ファイルピッカー・カメラコマンド・object_store）で UploadWorkflow を動かす

use photolift::adapter::config::{Config, StorageBackend};
use photolift::adapter::media::{
    Chooser, CommandCamera, DevicePermission, FileImagePicker, ImageCrateDecoder,
};
use photolift::adapter::storage::{build_object_store, ObjectStoreRepository};
use photolift::application::presenter::{Notice, UploadPresenter};
use photolift::application::workflow::{Collaborators, UploadWorkflow};
use photolift::domain::entities::preview::Preview;
use photolift::domain::entities::upload_event::{UploadOutcome, UploadProgress};
use photolift::domain::errors::WorkflowError;
use photolift::driver::prompt::InputLines;
use photolift::driver::{Command, PhotoUploadSession};

use async_trait::async_trait;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// 表示層への呼び出しを記録する
#[derive(Debug, Clone, PartialEq, Eq)]
enum Shown {
    Indicator(String),
    Progress(u8),
    Dismissed,
    Notice(Notice),
    Preview(String),
}

#[derive(Default)]
struct RecordingPresenter {
    shown: Mutex<Vec<Shown>>,
}

impl RecordingPresenter {
    fn shown(&self) -> Vec<Shown> {
        self.shown.lock().unwrap().clone()
    }

    fn notices(&self) -> Vec<Notice> {
        self.shown()
            .into_iter()
            .filter_map(|shown| match shown {
                Shown::Notice(notice) => Some(notice),
                _ => None,
            })
            .collect()
    }

    fn push(&self, shown: Shown) {
        self.shown.lock().unwrap().push(shown);
    }
}

impl UploadPresenter for RecordingPresenter {
    fn show_indicator(&self, title: &str) {
        self.push(Shown::Indicator(title.to_string()));
    }

    fn show_progress(&self, progress: UploadProgress) {
        self.push(Shown::Progress(progress.percent()));
    }

    fn dismiss_indicator(&self) {
        self.push(Shown::Dismissed);
    }

    fn notify(&self, notice: &Notice) {
        self.push(Shown::Notice(notice.clone()));
    }

    fn show_preview(&self, preview: &Preview) {
        self.push(Shown::Preview(preview.summary()));
    }
}

/// 常に先頭を選ぶチューザー
struct FirstChooser;

#[async_trait]
impl Chooser for FirstChooser {
    async fn choose(&self, _candidates: &[PathBuf]) -> Option<usize> {
        Some(0)
    }
}

/// テスト用のPNG画像を作成
fn write_png(path: &Path, width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x * y) % 251) as u8])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    let bytes = out.into_inner();
    fs::write(path, &bytes).unwrap();
    bytes
}

fn local_config(root: &Path, chunk_size_bytes: usize) -> Config {
    Config {
        backend: StorageBackend::Local,
        local_root: Some(root.to_string_lossy().to_string()),
        chunk_size_bytes,
        ..Config::default()
    }
}

struct Harness {
    workflow: UploadWorkflow,
    presenter: Arc<RecordingPresenter>,
}

fn harness(config: &Config, camera: CommandCamera, device: Option<PathBuf>) -> Harness {
    let store = build_object_store(config, false).unwrap();
    let presenter = Arc::new(RecordingPresenter::default());
    let workflow = UploadWorkflow::new(Collaborators {
        picker: Arc::new(FileImagePicker::new(Arc::new(FirstChooser))),
        camera: Arc::new(camera),
        permission: Arc::new(DevicePermission::new(device)),
        decoder: Arc::new(ImageCrateDecoder::new(config.preview_max_dimension)),
        storage: Arc::new(ObjectStoreRepository::new(store, &config.upload_config())),
        presenter: presenter.clone(),
    });
    Harness {
        workflow,
        presenter,
    }
}

fn no_camera(dir: &Path) -> CommandCamera {
    CommandCamera::new(Vec::new(), dir)
}

#[tokio::test]
async fn test_pick_preview_and_upload_to_local_store() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("cat.png");
    let data = write_png(&photo, 32, 24);
    let bucket = temp_dir.path().join("bucket");

    let config = local_config(&bucket, 1024 * 1024);
    let mut h = harness(&config, no_camera(temp_dir.path()), None);

    assert!(h.workflow.acquire_from_gallery(&photo).await.unwrap());
    let handle = h.workflow.trigger_upload().unwrap().unwrap();
    let key = handle.key().clone();
    let report = handle.wait().await.unwrap();

    assert_eq!(report.outcome, UploadOutcome::Success);
    assert_eq!(report.key, key);
    assert!(report.location.ends_with(&format!("bucket/images/{}", key)));

    // アップロードされたオブジェクトは元画像と同じ内容
    let stored = fs::read(bucket.join("images").join(key.as_str())).unwrap();
    assert_eq!(stored, data);

    assert_eq!(
        h.presenter.shown(),
        vec![
            Shown::Preview("32x24 (Png)".to_string()),
            Shown::Indicator("Uploading...".to_string()),
            Shown::Progress(0),
            Shown::Progress(100),
            Shown::Dismissed,
            Shown::Notice(Notice::Uploaded {
                location: report.location.clone()
            }),
        ]
    );
    assert!(!h.workflow.is_uploading());
}

#[tokio::test]
async fn test_multipart_upload_reports_monotonic_progress() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("large.png");
    let data = write_png(&photo, 200, 200);
    let chunk_size = 256;
    assert!(data.len() > chunk_size * 2);

    let bucket = temp_dir.path().join("bucket");
    let config = local_config(&bucket, chunk_size);
    let mut h = harness(&config, no_camera(temp_dir.path()), None);

    h.workflow.acquire_from_gallery(&photo).await.unwrap();
    let report = h
        .workflow
        .trigger_upload()
        .unwrap()
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert!(report.outcome.is_success());
    let percents: Vec<u8> = report.progress.iter().map(|p| p.percent()).collect();
    assert_eq!(percents.first(), Some(&0));
    assert_eq!(percents.last(), Some(&100));
    assert!(percents.len() > 2);
    assert!(percents.windows(2).all(|w| w[0] <= w[1]));

    let stored = fs::read(bucket.join("images").join(report.key.as_str())).unwrap();
    assert_eq!(stored, data);
}

#[tokio::test]
async fn test_gallery_directory_uses_chooser() {
    let temp_dir = TempDir::new().unwrap();
    let gallery = temp_dir.path().join("gallery");
    fs::create_dir(&gallery).unwrap();
    write_png(&gallery.join("b.png"), 4, 4);
    write_png(&gallery.join("a.png"), 8, 8);

    let config = Config::default();
    let mut h = harness(&config, no_camera(temp_dir.path()), None);

    assert!(h.workflow.acquire_from_gallery(&gallery).await.unwrap());
    assert_eq!(
        h.workflow.pending().and_then(|s| s.content_ref()),
        Some(gallery.join("a.png").as_path())
    );
}

#[tokio::test]
async fn test_non_image_pick_is_cancelled_and_nothing_uploads() {
    let temp_dir = TempDir::new().unwrap();
    let notes = temp_dir.path().join("notes.txt");
    fs::write(&notes, "not a photo").unwrap();

    let config = Config::default();
    let mut h = harness(&config, no_camera(temp_dir.path()), None);

    assert!(!h.workflow.acquire_from_gallery(&notes).await.unwrap());
    assert!(h.workflow.pending().is_none());
    assert!(h.workflow.trigger_upload().unwrap().is_none());
    assert!(h.presenter.shown().is_empty());
}

#[tokio::test]
async fn test_undecodable_image_is_still_uploaded() {
    let temp_dir = TempDir::new().unwrap();
    let broken = temp_dir.path().join("broken.png");
    fs::write(&broken, b"truncated").unwrap();

    let config = Config::default();
    let mut h = harness(&config, no_camera(temp_dir.path()), None);

    assert!(h.workflow.acquire_from_gallery(&broken).await.unwrap());
    let report = h
        .workflow
        .trigger_upload()
        .unwrap()
        .unwrap()
        .wait()
        .await
        .unwrap();

    assert!(report.outcome.is_success());
    assert!(!h
        .presenter
        .shown()
        .iter()
        .any(|shown| matches!(shown, Shown::Preview(_))));
}

#[tokio::test]
async fn test_missing_file_upload_fails_with_reason() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("gone.png");
    write_png(&photo, 4, 4);

    let config = Config::default();
    let mut h = harness(&config, no_camera(temp_dir.path()), None);
    h.workflow.acquire_from_gallery(&photo).await.unwrap();

    // 選択後にファイルが消えた
    fs::remove_file(&photo).unwrap();

    let report = h
        .workflow
        .trigger_upload()
        .unwrap()
        .unwrap()
        .wait()
        .await
        .unwrap();

    let reason = report.outcome.reason().unwrap().to_string();
    assert!(reason.contains("gone.png"));
    assert_eq!(
        h.presenter.notices(),
        vec![Notice::UploadFailed { reason }]
    );
    assert!(h.presenter.shown().contains(&Shown::Dismissed));
}

#[cfg(unix)]
#[tokio::test]
async fn test_camera_capture_uploads_frame() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("frame.png");
    let data = write_png(&source, 16, 16);
    let captures = temp_dir.path().join("captures");
    fs::create_dir(&captures).unwrap();

    let camera = CommandCamera::new(
        vec![
            "cp".to_string(),
            source.to_string_lossy().to_string(),
            "{output}".to_string(),
        ],
        &captures,
    );
    let device = temp_dir.path().join("video0");
    fs::write(&device, b"").unwrap();

    let config = Config::default();
    let mut h = harness(&config, camera, Some(device));

    assert!(h.workflow.acquire_from_camera().await.unwrap());
    let pending = h.workflow.pending().unwrap().clone();
    assert!(pending.is_captured());
    assert!(pending.content_ref().unwrap().starts_with(&captures));

    let report = h
        .workflow
        .trigger_upload()
        .unwrap()
        .unwrap()
        .wait()
        .await
        .unwrap();
    assert!(report.outcome.is_success());
    assert_eq!(fs::read(pending.content_ref().unwrap()).unwrap(), data);
}

#[tokio::test]
async fn test_camera_permission_denied_is_notified() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::default();
    let camera = CommandCamera::new(vec!["true".to_string()], temp_dir.path());
    let mut h = harness(
        &config,
        camera,
        Some(temp_dir.path().join("missing-video0")),
    );

    let result = h.workflow.acquire_from_camera().await;

    assert!(matches!(result, Err(WorkflowError::PermissionDenied(_))));
    assert!(h.workflow.pending().is_none());
    match h.presenter.notices().as_slice() {
        [Notice::Error(message)] => {
            assert!(message.starts_with("camera permission denied: "));
        }
        other => panic!("unexpected notices: {:?}", other),
    }
}

#[tokio::test]
async fn test_shell_session_picks_and_uploads() {
    let temp_dir = TempDir::new().unwrap();
    let gallery = temp_dir.path().join("gallery");
    fs::create_dir(&gallery).unwrap();
    write_png(&gallery.join("a.png"), 8, 8);
    write_png(&gallery.join("b.png"), 8, 8);

    let input = InputLines::from_lines(vec![
        "status".to_string(),
        "upload".to_string(),
        format!("pick {}", gallery.display()),
        "2".to_string(),
        "upload".to_string(),
        "quit".to_string(),
    ]);
    let presenter = Arc::new(RecordingPresenter::default());

    let mut session =
        PhotoUploadSession::with_io(&Config::default(), true, input, presenter.clone()).unwrap();
    session.execute(Command::Shell).await.unwrap();

    assert_eq!(
        session.workflow().pending().and_then(|s| s.content_ref()),
        Some(gallery.join("b.png").as_path())
    );
    match presenter.notices().as_slice() {
        [Notice::Uploaded { location }] => assert!(location.starts_with("memory:///images/")),
        other => panic!("unexpected notices: {:?}", other),
    }
}

#[tokio::test]
async fn test_one_shot_pick_waits_for_outcome() {
    let temp_dir = TempDir::new().unwrap();
    let photo = temp_dir.path().join("cat.png");
    write_png(&photo, 8, 8);

    let presenter = Arc::new(RecordingPresenter::default());
    let mut session = PhotoUploadSession::with_io(
        &Config::default(),
        true,
        InputLines::from_lines(Vec::<String>::new()),
        presenter.clone(),
    )
    .unwrap();

    session.execute(Command::Pick { path: photo }).await.unwrap();

    assert!(!session.workflow().is_uploading());
    assert!(matches!(
        presenter.notices().as_slice(),
        [Notice::Uploaded { .. }]
    ));
}
