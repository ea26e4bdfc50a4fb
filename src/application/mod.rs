//! # Application Layer
//!
//! アプリケーション固有のビジネスフロー（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせてフローを実現
//! - Repository traitと Presenter traitに依存（実装には依存しない）
//! - 外部システムの詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: Data Transfer Object
//! - **presenter**: 表示層への出力ポート
//! - **use_cases**: ユースケース
//! - **workflow**: 選択中の画像を保持し、ユースケースを束ねる `UploadWorkflow`

pub mod dto;
pub mod presenter;
pub mod use_cases;
pub mod workflow;
