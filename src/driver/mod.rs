//! # Driver Layer (Presentation)
//!
//! CLIと対話シェルを提供
//!
//! ## 特徴
//!
//! - ワークフローを呼び出して選択・アップロードを起動
//! - 依存性注入（DI）を行い、全てを組み立てる
//! - ユーザーとのインターフェース
//!
//! ## 構成要素
//!
//! - **cli**: CLI引数のパース
//! - **prompt**: 標準入力と画像の番号選択
//! - **shell**: 対話コマンドの解釈
//! - **workflow**: セッション全体のオーケストレーション

pub mod cli;
pub mod prompt;
pub mod shell;
pub mod workflow;

pub use cli::{Args, Command};
pub use workflow::PhotoUploadSession;
