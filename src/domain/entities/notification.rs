//! # Notification Entity
//!
//! 送信する通知メールのビジネス表現

use std::path::PathBuf;

/// 通知メール
///
/// 本文と添付ファイルのパスを保持する。添付ファイルの読み込みは
/// 送信側（Mailer 実装）が行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// 差出人の表示名
    pub from_name: String,
    /// 差出人アドレス
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<PathBuf>,
}
