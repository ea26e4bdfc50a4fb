//! Photolift - Photo Uploader
//!
//! 画像を選択・撮影してオブジェクトストレージにアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use log::info;

use photolift::adapter::config::Config;
use photolift::driver::{Args, PhotoUploadSession};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    info!("Dry run: {}", args.dry_run);

    // Load configuration
    let config = Config::load_or_default(&args.config)?;

    // Create session with injected dependencies
    let mut session = PhotoUploadSession::new(&config, args.dry_run)?;

    session.execute(args.command).await
}
