//! Session Orchestration
//!
//! アダプターを組み立ててワークフローを動かす

use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use crate::adapter::config::Config;
use crate::adapter::media::{CommandCamera, DevicePermission, FileImagePicker, ImageCrateDecoder};
use crate::adapter::presenter::ConsolePresenter;
use crate::adapter::storage::{build_object_store, ObjectStoreRepository};
use crate::application::presenter::UploadPresenter;
use crate::application::workflow::{Collaborators, UploadHandle, UploadWorkflow};
use crate::domain::errors::WorkflowError;

use super::cli::Command;
use super::prompt::{InputLines, PromptChooser};
use super::shell::{ShellCommand, HELP};

/// Photo Upload Session
pub struct PhotoUploadSession {
    workflow: UploadWorkflow,
    input: InputLines,
    uploads: Vec<UploadHandle>,
    // 撮影ファイルはセッション終了時にディレクトリごと消える
    captures: TempDir,
}

impl PhotoUploadSession {
    /// Create a session on the terminal with dependency injection
    pub fn new(config: &Config, dry_run: bool) -> Result<Self> {
        Self::with_io(
            config,
            dry_run,
            InputLines::stdin(),
            Arc::new(ConsolePresenter::stdout()),
        )
    }

    /// Create a session with explicit input and presenter
    pub fn with_io(
        config: &Config,
        dry_run: bool,
        input: InputLines,
        presenter: Arc<dyn UploadPresenter>,
    ) -> Result<Self> {
        let store = build_object_store(config, dry_run)?;
        let storage = Arc::new(ObjectStoreRepository::new(store, &config.upload_config()));

        let captures = tempfile::Builder::new()
            .prefix("photolift-captures-")
            .tempdir()
            .context("Failed to create capture directory")?;

        let collaborators = Collaborators {
            picker: Arc::new(FileImagePicker::new(Arc::new(PromptChooser::new(
                input.clone(),
            )))),
            camera: Arc::new(CommandCamera::new(
                config.camera_command.clone(),
                captures.path(),
            )),
            permission: Arc::new(DevicePermission::new(
                config.camera_device.as_ref().map(PathBuf::from),
            )),
            decoder: Arc::new(ImageCrateDecoder::new(config.preview_max_dimension)),
            storage,
            presenter,
        };

        Ok(Self {
            workflow: UploadWorkflow::new(collaborators),
            input,
            uploads: Vec::new(),
            captures,
        })
    }

    pub fn workflow(&self) -> &UploadWorkflow {
        &self.workflow
    }

    /// Directory the camera command writes captures into
    pub fn capture_dir(&self) -> &Path {
        self.captures.path()
    }

    /// Execute one CLI command
    ///
    /// Workflow errors are already shown to the user, so only startup and
    /// task failures come back as `Err`.
    pub async fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Pick { path } => {
                let acquired = self.workflow.acquire_from_gallery(&path).await;
                self.upload_once(acquired).await
            }
            Command::Capture => {
                let acquired = self.workflow.acquire_from_camera().await;
                self.upload_once(acquired).await
            }
            Command::Shell => self.run_shell().await,
        }
    }

    async fn upload_once(&mut self, acquired: Result<bool, WorkflowError>) -> Result<()> {
        match acquired {
            Ok(true) => {}
            Ok(false) => {
                println!("No image selected.");
                return Ok(());
            }
            Err(_) => return Ok(()),
        }

        if let Ok(Some(handle)) = self.workflow.trigger_upload() {
            let report = handle.wait().await?;
            info!(
                "Upload of {} finished: {:?}",
                report.key, report.outcome
            );
        }
        Ok(())
    }

    async fn run_shell(&mut self) -> Result<()> {
        println!("photolift shell. Type `help` for commands.");

        loop {
            print!("photolift> ");
            let _ = io::stdout().flush();

            let Some(line) = self.input.next_line().await else {
                break;
            };
            let Some(command) = ShellCommand::parse(&line) else {
                continue;
            };

            match command {
                ShellCommand::Pick(path) => self.pick(&path).await,
                ShellCommand::Capture => {
                    if let Ok(false) = self.workflow.acquire_from_camera().await {
                        println!("No photo taken.");
                    }
                }
                ShellCommand::Upload => self.upload(),
                ShellCommand::Status => self.status(),
                ShellCommand::Help => println!("{}", HELP),
                ShellCommand::Quit => break,
                ShellCommand::Usage(usage) => println!("{}", usage),
                ShellCommand::Unknown(name) => {
                    println!("Unknown command: {} (type `help`)", name)
                }
            }
        }

        self.wait_for_uploads().await
    }

    async fn pick(&mut self, path: &Path) {
        if let Ok(false) = self.workflow.acquire_from_gallery(path).await {
            println!("No image selected.");
        }
    }

    fn upload(&mut self) {
        self.uploads.retain(|handle| !handle.is_finished());
        match self.workflow.trigger_upload() {
            Ok(Some(handle)) => {
                println!("Uploading as {}", handle.key());
                self.uploads.push(handle);
            }
            Ok(None) => println!("No image selected. Use `pick` or `capture` first."),
            Err(_) => {}
        }
    }

    fn status(&self) {
        match self.workflow.pending() {
            Some(selection) => println!("Selected: {}", selection.describe()),
            None => println!("Selected: none"),
        }
        if self.workflow.is_uploading() {
            println!("Upload in progress");
        }
    }

    async fn wait_for_uploads(&mut self) -> Result<()> {
        let uploads = std::mem::take(&mut self.uploads);
        if uploads.iter().any(|handle| !handle.is_finished()) {
            println!("Waiting for uploads to finish...");
        }
        for handle in uploads {
            if let Err(e) = handle.wait().await {
                warn!("{:#}", e);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(camera_command: Vec<String>) -> PhotoUploadSession {
        let config = Config {
            camera_command,
            ..Config::default()
        };
        PhotoUploadSession::with_io(
            &config,
            true,
            InputLines::from_lines(Vec::<String>::new()),
            Arc::new(ConsolePresenter::new(Box::new(io::sink()))),
        )
        .unwrap()
    }

    #[test]
    fn test_capture_dir_removed_with_session() {
        let session = session(Vec::new());
        let dir = session.capture_dir().to_path_buf();
        assert!(dir.is_dir());

        drop(session);

        assert!(!dir.exists());
    }

    #[test]
    fn test_sessions_do_not_share_capture_dir() {
        let first = session(Vec::new());
        let second = session(Vec::new());
        assert_ne!(first.capture_dir(), second.capture_dir());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_captured_frame_is_cleaned_up() {
        let mut session = session(vec![
            "sh".to_string(),
            "-c".to_string(),
            "printf frame > \"$0\"".to_string(),
            "{output}".to_string(),
        ]);

        session.execute(Command::Capture).await.unwrap();

        let frame = session
            .workflow()
            .pending()
            .and_then(|s| s.content_ref())
            .map(Path::to_path_buf)
            .unwrap();
        assert!(frame.starts_with(session.capture_dir()));
        assert!(frame.is_file());

        drop(session);

        assert!(!frame.exists());
    }
}
