//! Terminal Input
//!
//! 標準入力の行読み取りと、番号で画像を選ぶチューザー

use async_trait::async_trait;
use log::warn;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use crate::adapter::media::gallery::Chooser;

/// Shared line source for the shell and the gallery chooser
#[derive(Clone)]
pub struct InputLines {
    rx: Arc<Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl InputLines {
    /// Reads stdin on a dedicated thread so the runtime never blocks on it
    pub fn stdin() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        std::thread::spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });
        Self::from_receiver(rx)
    }

    /// Fixed input, ending after the last line
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        for line in lines {
            let _ = tx.send(line.into());
        }
        Self::from_receiver(rx)
    }

    fn from_receiver(rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            rx: Arc::new(Mutex::new(rx)),
        }
    }

    /// Next line, or `None` at end of input
    pub async fn next_line(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }
}

/// 画像一覧を番号付きで表示して選ばせる
pub struct PromptChooser {
    input: InputLines,
}

impl PromptChooser {
    pub fn new(input: InputLines) -> Self {
        Self { input }
    }

    /// 1始まりの番号を解釈する（空入力は取り消し）
    fn parse_choice(line: &str, count: usize) -> Option<usize> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        match line.parse::<usize>() {
            Ok(n) if (1..=count).contains(&n) => Some(n - 1),
            _ => {
                warn!("Invalid choice: {}", line);
                None
            }
        }
    }
}

#[async_trait]
impl Chooser for PromptChooser {
    async fn choose(&self, candidates: &[PathBuf]) -> Option<usize> {
        for (i, path) in candidates.iter().enumerate() {
            println!("  {:>3}) {}", i + 1, path.display());
        }
        print!(
            "Choose an image [1-{}] (empty to cancel): ",
            candidates.len()
        );
        let _ = io::stdout().flush();

        let line = self.input.next_line().await?;
        Self::parse_choice(&line, candidates.len())
    }
}
