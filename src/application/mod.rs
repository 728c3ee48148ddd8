//! # Application Layer
//!
//! 動画1本のアップロードと通知の流れ（ユースケース）
//!
//! ## 特徴
//!
//! - Domain層のエンティティとサービスを組み合わせて処理を組み立てる
//! - StorageConnector / Mailer / VideoRepository に依存（実装には依存しない）
//! - Google Drive や SMTP の詳細は知らない
//!
//! ## 構成要素
//!
//! - **dto**: 実行時オプション（UploadConfig, NotificationConfig）
//! - **use_cases**: ResolveFolderUseCase, SendNotificationUseCase, UploadVideoUseCase

pub mod dto;
pub mod use_cases;
