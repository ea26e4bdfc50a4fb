//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// 画像を選択・撮影してオブジェクトストレージにアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "photolift")]
#[command(about = "Pick or capture a photo and upload it to object storage", long_about = None)]
pub struct Args {
    /// Dry run mode - upload to an in-memory store only
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Config file path
    #[arg(
        short,
        long,
        global = true,
        default_value = "./.photolift/config.json"
    )]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Pick an image file (or choose one from a directory) and upload it
    Pick {
        /// Image file or gallery directory
        path: PathBuf,
    },
    /// Capture a photo with the configured camera command and upload it
    Capture,
    /// Interactive session
    Shell,
}
