//! # Upload Configuration DTO
//!
//! アップロード設定のData Transfer Object

/// 通知メールの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// 差出人の表示名
    pub from_name: String,
    /// 差出人アドレス
    pub sender: String,
    /// 宛先（展開済み）
    pub recipients: Vec<String>,
    /// 件名のテンプレート（カメラ名が付加される）
    pub subject: String,
    /// 本文の先頭行
    pub message: String,
}

/// アップロード設定
///
/// 1回の実行で使うオプション。設定ファイルから作られ、実行中は変更されない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    /// アップロード先のメインフォルダ名
    pub folder: String,
    /// メインフォルダの下に日付フォルダを作るかどうか
    pub daily_folders: bool,
    /// アップロード後にメールを送るかどうか
    pub send_email: bool,
    /// アップロード後にローカルファイルを削除するかどうか
    pub delete_after_upload: bool,
    pub notification: NotificationConfig,
}

impl UploadConfig {
    /// 新しいアップロード設定を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use motion_uploader::application::dto::upload_config::{NotificationConfig, UploadConfig};
    ///
    /// let notification = NotificationConfig {
    ///     from_name: "Motion".to_string(),
    ///     sender: "motion@example.com".to_string(),
    ///     recipients: vec!["alice@example.com".to_string()],
    ///     subject: "Motion detected".to_string(),
    ///     message: "A new video was uploaded".to_string(),
    /// };
    ///
    /// let config = UploadConfig::new("motion".to_string(), true, true, false, notification);
    ///
    /// assert!(config.daily_folders);
    /// assert!(config.send_email);
    /// assert!(!config.delete_after_upload);
    /// ```
    pub fn new(
        folder: String,
        daily_folders: bool,
        send_email: bool,
        delete_after_upload: bool,
        notification: NotificationConfig,
    ) -> Self {
        Self {
            folder,
            daily_folders,
            send_email,
            delete_after_upload,
            notification,
        }
    }
}
