//! # Domain Layer
//!
//! このモジュールはビジネスの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部依存を持たない（Rust標準ライブラリと最小限の依存のみ）
//! - Google Drive や SMTP について何も知らない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **error**: エラー分類（UploaderError）
//! - **entities**: ビジネスエンティティ（VideoFile, RemoteFile, Notificationなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（フォルダ命名、メッセージ組み立て）

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
