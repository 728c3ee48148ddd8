//! # Send Notification Use Case
//!
//! 通知メール送信ユースケース

use std::sync::Arc;

use log::{info, warn};

use crate::application::dto::upload_config::NotificationConfig;
use crate::domain::entities::notification::Notification;
use crate::domain::entities::remote_file::RemoteFile;
use crate::domain::entities::video_file::VideoFile;
use crate::domain::error::Result;
use crate::domain::repositories::mail_repository::Mailer;
use crate::domain::services::message::MessageService;

/// 通知メール送信ユースケース
///
/// アップロードされたファイルのリンクとサムネイルを添えてメールを送る
pub struct SendNotificationUseCase<M: Mailer> {
    mailer: Arc<M>,
}

impl<M: Mailer> SendNotificationUseCase<M> {
    pub fn new(mailer: Arc<M>) -> Self {
        Self { mailer }
    }

    /// 通知メールを組み立てる（送信はしない）
    ///
    /// サムネイル（動画と同じディレクトリの `motion.jpg`）が存在しない場合は
    /// 添付なしで組み立てる。
    pub async fn compose(
        config: &NotificationConfig,
        video: &VideoFile,
        remote: &RemoteFile,
    ) -> Notification {
        let thumbnail = video.thumbnail_path();
        let attachments = match tokio::fs::try_exists(&thumbnail).await {
            Ok(true) => vec![thumbnail],
            _ => {
                warn!("Thumbnail not found: {}", thumbnail.display());
                vec![]
            }
        };

        Notification {
            from_name: config.from_name.clone(),
            sender: config.sender.clone(),
            recipients: config.recipients.clone(),
            subject: MessageService::compose_subject(&config.subject, video.camera_name()),
            body: MessageService::compose_body(
                &config.message,
                &remote.title,
                remote.alternate_link.as_deref(),
            ),
            attachments,
        }
    }

    /// 通知メールを組み立てて送信する
    ///
    /// # Returns
    ///
    /// 送信した通知
    ///
    /// # Errors
    ///
    /// 送信に失敗した場合に `UploaderError::Notification` を返す
    pub async fn execute(
        &self,
        config: &NotificationConfig,
        video: &VideoFile,
        remote: &RemoteFile,
    ) -> Result<Notification> {
        let notification = Self::compose(config, video, remote).await;
        self.mailer.send(&notification).await?;

        info!(
            "Notification sent to {} recipient(s)",
            notification.recipients.len()
        );
        Ok(notification)
    }
}
