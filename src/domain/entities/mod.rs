//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **VideoFile**: アップロード対象のローカル動画
//! - **RemoteFolder / RemoteFile**: ストレージサービス上のフォルダとファイル
//! - **Notification**: 通知メール

pub mod notification;
pub mod remote_file;
pub mod video_file;
