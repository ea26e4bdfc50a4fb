//! Console Presenter
//!
//! UploadPresenterの端末実装

use log::warn;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use crate::application::presenter::{Notice, UploadPresenter};
use crate::domain::entities::preview::Preview;
use crate::domain::entities::upload_event::UploadProgress;

/// 端末に1行ずつ書き出すプレゼンター
pub struct ConsolePresenter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsolePresenter {
    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// 標準出力に書き出すプレゼンター
    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    fn line(&self, args: fmt::Arguments<'_>) {
        let Ok(mut out) = self.out.lock() else {
            warn!("Console output is unavailable");
            return;
        };
        if let Err(e) = out.write_fmt(args).and_then(|_| out.write_all(b"\n")) {
            warn!("Failed to write to console: {}", e);
            return;
        }
        let _ = out.flush();
    }
}

impl UploadPresenter for ConsolePresenter {
    fn show_indicator(&self, title: &str) {
        self.line(format_args!("{}", title));
    }

    fn show_progress(&self, progress: UploadProgress) {
        self.line(format_args!("Uploaded {}", progress));
    }

    fn dismiss_indicator(&self) {
        // 端末ではインジケーターは行として残るので閉じる操作はない
    }

    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::Uploaded { location } => {
                self.line(format_args!("{} ({})", notice, location))
            }
            _ => self.line(format_args!("{}", notice)),
        }
    }

    fn show_preview(&self, preview: &Preview) {
        self.line(format_args!("Preview: {}", preview.summary()));
    }
}
