//! # Uploader Errors
//!
//! アップロード処理全体で使うエラー分類

use std::path::PathBuf;

use thiserror::Error;

/// アップロード処理のエラー
///
/// どのステップで失敗したかを表す。各ステップのエラーはそのまま
/// エントリポイントまで伝播する。
#[derive(Debug, Error)]
pub enum UploaderError {
    /// 設定ファイルの読み込み・解析の失敗
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 認証情報の拒否、トークンの期限切れ・不正
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// 必要なフォルダが見つからず、作成もできない
    #[error("Could not find the {0} folder")]
    FolderNotFound(String),

    /// アップロード中の通信・API エラー
    #[error("Upload failed: {0}")]
    Upload(String),

    /// メール送信の失敗
    #[error("Notification failed: {0}")]
    Notification(String),

    /// ローカルファイル削除の失敗
    #[error("Failed to delete {}: {source}", .path.display())]
    LocalCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// ドメイン共通の Result 型
pub type Result<T> = std::result::Result<T, UploaderError>;
