//! Configuration Loader
//!
//! 設定ファイル（TOML）の読み込み

use std::fmt;
use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Deserializer};

use crate::adapter::auth::oauth::OAuthCredentials;
use crate::application::dto::upload_config::{NotificationConfig, UploadConfig};
use crate::domain::error::{Result, UploaderError};
use crate::domain::services::message::MessageService;

/// 設定ファイル全体
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub gmail: GmailSection,
    pub drive: DriveSection,
    pub options: OptionsSection,
}

/// `[gmail]` セクション: メールアカウントと通知内容
#[derive(Clone, Deserialize)]
pub struct GmailSection {
    pub user: String,
    pub password: String,
    /// 差出人の表示名
    pub name: String,
    pub sender: String,
    /// カンマ区切りの宛先
    #[serde(alias = "recipients")]
    pub recipient: String,
    pub subject: String,
    pub message: String,
}

/// `[drive]` セクション: アップロード先と認証トークン
#[derive(Clone, Deserialize)]
pub struct DriveSection {
    pub folder: String,
    /// JSON形式の OAuth2 認証情報
    pub auth_token: String,
}

/// `[options]` セクション
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionsSection {
    #[serde(deserialize_with = "deserialize_flag")]
    pub delete_after_upload: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub send_email: bool,
    #[serde(default = "default_daily_folders", deserialize_with = "deserialize_flag")]
    pub daily_folders: bool,
}

fn default_daily_folders() -> bool {
    true
}

// パスワードとトークンは Debug 出力に含めない
impl fmt::Debug for GmailSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GmailSection")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("sender", &self.sender)
            .field("recipient", &self.recipient)
            .field("subject", &self.subject)
            .field("message", &self.message)
            .finish()
    }
}

impl fmt::Debug for DriveSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveSection")
            .field("folder", &self.folder)
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

/// 真偽値リテラルを解析する
///
/// TOML の真偽値に加えて `1/yes/true/on`、`0/no/false/off`（大文字小文字を区別しない）を受け付ける
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match FlagValue::deserialize(deserializer)? {
        FlagValue::Bool(b) => Ok(b),
        FlagValue::Int(1) => Ok(true),
        FlagValue::Int(0) => Ok(false),
        FlagValue::Int(n) => Err(serde::de::Error::custom(format!(
            "not a boolean: {}",
            n
        ))),
        FlagValue::Text(s) => parse_flag(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("not a boolean: {}", s))),
    }
}

impl Config {
    /// 設定ファイルを読み込む
    ///
    /// # Errors
    ///
    /// 必須キーの欠落、真偽値の不正、認証トークンの不正の場合に
    /// `UploaderError::Configuration` を返す
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UploaderError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// 設定ファイルの内容を解析する
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| UploaderError::Configuration(e.message().to_string()))?;

        // 認証トークンはネットワーク接続前に検証する
        config.drive.credentials()?;

        if config.options.send_email && config.recipients().is_empty() {
            return Err(UploaderError::Configuration(
                "send-email is enabled but no recipient is configured".to_string(),
            ));
        }

        config.trace_loaded();
        Ok(config)
    }

    /// 展開済みの宛先リスト
    pub fn recipients(&self) -> Vec<String> {
        MessageService::parse_recipients(&self.gmail.recipient)
    }

    /// ユースケース用の設定に変換する
    pub fn upload_config(&self) -> UploadConfig {
        UploadConfig::new(
            self.drive.folder.clone(),
            self.options.daily_folders,
            self.options.send_email,
            self.options.delete_after_upload,
            NotificationConfig {
                from_name: self.gmail.name.clone(),
                sender: self.gmail.sender.clone(),
                recipients: self.recipients(),
                subject: self.gmail.subject.clone(),
                message: self.gmail.message.clone(),
            },
        )
    }

    fn trace_loaded(&self) {
        info!(
            "Loaded config: folder={}, daily_folders={}, send_email={}, delete_after_upload={}",
            self.drive.folder,
            self.options.daily_folders,
            self.options.send_email,
            self.options.delete_after_upload
        );
        debug!("Config loaded: {:?}", self);
    }
}

impl DriveSection {
    /// `auth_token` を OAuth2 認証情報として解析する
    pub fn credentials(&self) -> Result<OAuthCredentials> {
        OAuthCredentials::from_json(&self.auth_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOKEN: &str = r#"{"access_token": "ya29.test", "refresh_token": "1/refresh", "client_id": "client", "client_secret": "secret", "token_expiry": "2015-03-21T10:00:00Z"}"#;

    fn create_config_content(options: &str) -> String {
        format!(
            r#"
[gmail]
user = "motion@gmail.com"
password = "app-password"
name = "Motion"
sender = "motion@gmail.com"
recipient = "a@x.com,b@x.com"
subject = "Motion detected"
message = "A new video was uploaded"

[drive]
folder = "motion"
auth_token = '{}'

[options]
{}
"#,
            TOKEN, options
        )
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            create_config_content("delete-after-upload = true\nsend-email = false").as_bytes(),
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.gmail.user, "motion@gmail.com");
        assert_eq!(config.drive.folder, "motion");
        assert!(config.options.delete_after_upload);
        assert!(!config.options.send_email);
        assert!(config.options.daily_folders);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/motion-uploader.toml");
        assert!(matches!(result, Err(UploaderError::Configuration(_))));
    }

    #[test]
    fn test_string_flags() {
        let config = Config::parse(&create_config_content(
            "delete-after-upload = \"yes\"\nsend-email = \"Off\"\ndaily-folders = \"0\"",
        ))
        .unwrap();

        assert!(config.options.delete_after_upload);
        assert!(!config.options.send_email);
        assert!(!config.options.daily_folders);
    }

    #[test]
    fn test_invalid_flag() {
        let result = Config::parse(&create_config_content(
            "delete-after-upload = \"maybe\"\nsend-email = false",
        ));

        match result {
            Err(UploaderError::Configuration(message)) => {
                assert!(message.contains("maybe"), "unexpected message: {}", message)
            }
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_flag() {
        let result = Config::parse(&create_config_content("send-email = false"));

        match result {
            Err(UploaderError::Configuration(message)) => {
                assert!(message.contains("delete-after-upload"))
            }
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_subject() {
        let content = create_config_content("delete-after-upload = false\nsend-email = true")
            .replace("subject = \"Motion detected\"\n", "");

        match Config::parse(&content) {
            Err(UploaderError::Configuration(message)) => assert!(message.contains("subject")),
            other => panic!("expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_recipients_alias() {
        let content = create_config_content("delete-after-upload = false\nsend-email = true")
            .replace("recipient = ", "recipients = ");

        let config = Config::parse(&content).unwrap();
        assert_eq!(config.recipients(), vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_send_email_requires_recipient() {
        let content = create_config_content("delete-after-upload = false\nsend-email = true")
            .replace("a@x.com,b@x.com", " , ");

        assert!(matches!(
            Config::parse(&content),
            Err(UploaderError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_auth_token() {
        let content = create_config_content("delete-after-upload = false\nsend-email = false")
            .replace(TOKEN, "not json");

        assert!(matches!(
            Config::parse(&content),
            Err(UploaderError::Configuration(_))
        ));
    }

    #[test]
    fn test_upload_config_conversion() {
        let config = Config::parse(&create_config_content(
            "delete-after-upload = false\nsend-email = true\ndaily-folders = false",
        ))
        .unwrap();

        let upload_config = config.upload_config();
        assert_eq!(upload_config.folder, "motion");
        assert!(!upload_config.daily_folders);
        assert!(upload_config.send_email);
        assert_eq!(upload_config.notification.from_name, "Motion");
        assert_eq!(upload_config.notification.recipients.len(), 2);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = Config::parse(&create_config_content(
            "delete-after-upload = false\nsend-email = false",
        ))
        .unwrap();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("app-password"));
        assert!(!debug.contains("ya29.test"));
    }

    #[test]
    fn test_parse_flag_literals() {
        for literal in ["1", "yes", "TRUE", "on"] {
            assert_eq!(parse_flag(literal), Some(true), "{}", literal);
        }
        for literal in ["0", "No", "false", "OFF"] {
            assert_eq!(parse_flag(literal), Some(false), "{}", literal);
        }
        assert_eq!(parse_flag("enabled"), None);
    }
}
