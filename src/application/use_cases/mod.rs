//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ResolveFolderUseCase**: アップロード先フォルダの解決・作成
//! - **SendNotificationUseCase**: 通知メールの組み立てと送信
//! - **UploadVideoUseCase**: 認証からローカル削除までの一連の流れ

pub mod resolve_folder;
pub mod send_notification;
pub mod upload_video;
