//! # Mail Repository Trait
//!
//! 通知メール送信を抽象化

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::notification::Notification;
use crate::domain::error::Result;

/// メール送信
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// 通知を全ての宛先に一度だけ送信する（リトライなし）
    ///
    /// # Errors
    ///
    /// 接続・認証・送信のいずれかに失敗した場合に
    /// `UploaderError::Notification` を返す
    async fn send(&self, notification: &Notification) -> Result<()>;
}
