//! Shell Commands
//!
//! 対話セッションのコマンド解釈

use std::path::PathBuf;

pub const HELP: &str = "\
Commands:
  pick <path>   select an image file, or choose one from a directory
  capture       take a photo with the configured camera
  upload        upload the selected image in the background
  status        show the selected image and whether an upload is running
  help          show this help
  quit          wait for running uploads and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Pick(PathBuf),
    Capture,
    Upload,
    Status,
    Help,
    Quit,
    /// 引数が足りないなど、使い方の誤り
    Usage(&'static str),
    Unknown(String),
}

impl ShellCommand {
    /// 1行を解釈する。空行は `None`
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        let command = match name {
            "pick" if rest.is_empty() => Self::Usage("usage: pick <path>"),
            "pick" => Self::Pick(PathBuf::from(rest)),
            "capture" => Self::Capture,
            "upload" => Self::Upload,
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        };
        Some(command)
    }
}
