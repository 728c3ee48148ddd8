//! SMTP Mailer
//!
//! Mailer の SMTP (STARTTLS) 実装

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;

use crate::adapter::config::GmailSection;
use crate::domain::entities::notification::Notification;
use crate::domain::error::{Result, UploaderError};
use crate::domain::repositories::mail_repository::Mailer;

pub const SMTP_HOST: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;
const SMTP_TIMEOUT_SECS: u64 = 60;

fn mail_error(context: &str, e: impl std::fmt::Display) -> UploaderError {
    UploaderError::Notification(format!("{}: {}", context, e))
}

fn parse_address(address: &str) -> Result<Address> {
    address
        .parse::<Address>()
        .map_err(|e| mail_error(&format!("Invalid address {}", address), e))
}

/// 添付ファイルを読み込んで MIME パートにする
fn attachment_part(path: &Path) -> Result<SinglePart> {
    let data = std::fs::read(path)
        .map_err(|e| mail_error(&format!("Failed to read attachment {}", path.display()), e))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "attachment".to_string());
    let content_type =
        ContentType::parse("image/jpeg").map_err(|e| mail_error("Invalid content type", e))?;

    Ok(Attachment::new(file_name).body(data, content_type))
}

/// 通知からメールメッセージを組み立てる
///
/// 本文（text/plain）と添付画像からなる multipart/mixed メッセージ
pub fn build_message(notification: &Notification) -> Result<Message> {
    let from = Mailbox::new(
        Some(notification.from_name.clone()),
        parse_address(&notification.sender)?,
    );

    let mut builder = Message::builder()
        .from(from)
        .subject(notification.subject.as_str())
        .date_now();
    for recipient in &notification.recipients {
        builder = builder.to(Mailbox::new(None, parse_address(recipient)?));
    }

    let mut body = MultiPart::mixed().singlepart(SinglePart::plain(notification.body.clone()));
    for path in &notification.attachments {
        body = body.singlepart(attachment_part(path)?);
    }

    builder
        .multipart(body)
        .map_err(|e| mail_error("Failed to build message", e))
}

/// SMTP メール送信
pub struct SmtpMailer {
    user: String,
    password: String,
    host: String,
    port: u16,
}

impl SmtpMailer {
    /// `[gmail]` セクションのアカウントで送信する
    pub fn from_config(gmail: &GmailSection) -> Self {
        Self {
            user: gmail.user.clone(),
            password: gmail.password.clone(),
            host: SMTP_HOST.to_string(),
            port: SMTP_PORT,
        }
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| mail_error("Failed to configure SMTP relay", e))?
            .port(self.port)
            .credentials(Credentials::new(self.user.clone(), self.password.clone()))
            .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECS)))
            .build();
        Ok(transport)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let message = build_message(notification)?;
        let transport = self.transport()?;

        transport
            .send(message)
            .await
            .map_err(|e| mail_error("SMTP send failed", e))?;

        info!(
            "Sent mail via {}:{} to {}",
            self.host,
            self.port,
            notification.recipients.join(", ")
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_notification(attachments: Vec<std::path::PathBuf>) -> Notification {
        Notification {
            from_name: "Motion".to_string(),
            sender: "motion@example.com".to_string(),
            recipients: vec!["a@x.com".to_string(), "b@x.com".to_string()],
            subject: "Motion detected - garden".to_string(),
            body: "A new video was uploaded\n\nvid001.avi\nhttps://drive.google.com/file/d/1/view"
                .to_string(),
            attachments,
        }
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(&create_notification(vec![])).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("From: \"Motion\" <motion@example.com>")
            || formatted.contains("From: Motion <motion@example.com>"));
        assert!(formatted.contains("a@x.com"));
        assert!(formatted.contains("b@x.com"));
        assert!(formatted.contains("Subject: Motion detected - garden"));
        assert!(formatted.contains("multipart/mixed"));
    }

    #[test]
    fn test_build_message_envelope_recipients() {
        let message = build_message(&create_notification(vec![])).unwrap();
        let recipients: Vec<String> = message
            .envelope()
            .to()
            .iter()
            .map(|a| a.to_string())
            .collect();

        assert_eq!(recipients, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_build_message_with_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let thumbnail = temp_dir.path().join("motion.jpg");
        fs::write(&thumbnail, b"\xFF\xD8\xFF\xE0jpeg").unwrap();

        let message = build_message(&create_notification(vec![thumbnail])).unwrap();
        let formatted = String::from_utf8(message.formatted()).unwrap();

        assert!(formatted.contains("image/jpeg"));
        assert!(formatted.contains("filename=\"motion.jpg\""));
    }

    #[test]
    fn test_build_message_missing_attachment() {
        let result = build_message(&create_notification(vec!["/nonexistent/motion.jpg".into()]));
        assert!(matches!(result, Err(UploaderError::Notification(_))));
    }

    #[test]
    fn test_build_message_invalid_recipient() {
        let mut notification = create_notification(vec![]);
        notification.recipients.push("not-an-address".to_string());

        assert!(matches!(
            build_message(&notification),
            Err(UploaderError::Notification(_))
        ));
    }
}
