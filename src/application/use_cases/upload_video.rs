//! # Upload Video Use Case
//!
//! 動画アップロードユースケース（認証 → フォルダ解決 → アップロード → 通知 → 削除）

use std::sync::Arc;

use chrono::NaiveDate;
use log::info;

use crate::application::dto::upload_config::UploadConfig;
use crate::application::use_cases::resolve_folder::ResolveFolderUseCase;
use crate::application::use_cases::send_notification::SendNotificationUseCase;
use crate::domain::entities::notification::Notification;
use crate::domain::entities::remote_file::{NewRemoteFile, RemoteFile, RemoteFolder};
use crate::domain::entities::video_file::VideoFile;
use crate::domain::error::Result;
use crate::domain::repositories::mail_repository::Mailer;
use crate::domain::repositories::storage_repository::StorageConnector;
use crate::domain::repositories::video_repository::VideoRepository;

/// アップロード結果のレポート
#[derive(Debug, Clone)]
pub struct UploadReport {
    /// アップロード先フォルダ
    pub folder: RemoteFolder,
    /// 作成されたリモートファイル
    pub file: RemoteFile,
    /// 送信した通知（送信しなかった場合は None）
    pub notification: Option<Notification>,
    /// ローカルファイルを削除したかどうか
    pub deleted: bool,
}

/// 動画アップロードユースケース
///
/// 1回の実行で1つの動画を処理する。どのステップのエラーも
/// そのまま呼び出し元に返し、以降のステップは実行しない。
pub struct UploadVideoUseCase<C: StorageConnector, M: Mailer, V: VideoRepository> {
    config: UploadConfig,
    connector: Arc<C>,
    resolve_folder: ResolveFolderUseCase,
    send_notification: SendNotificationUseCase<M>,
    video_repository: Arc<V>,
}

impl<C: StorageConnector, M: Mailer, V: VideoRepository> UploadVideoUseCase<C, M, V> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `config` - アップロード設定
    /// * `connector` - ストレージへの接続
    /// * `mailer` - メール送信
    /// * `video_repository` - ローカル動画リポジトリ
    pub fn new(
        config: UploadConfig,
        connector: Arc<C>,
        mailer: Arc<M>,
        video_repository: Arc<V>,
    ) -> Self {
        let resolve_folder = ResolveFolderUseCase::new(&config);
        Self {
            config,
            connector,
            resolve_folder,
            send_notification: SendNotificationUseCase::new(mailer),
            video_repository,
        }
    }

    /// 動画をアップロードし、必要なら通知と削除を行う
    ///
    /// # Arguments
    ///
    /// * `video` - アップロードする動画
    /// * `upload_date` - 日付フォルダ名に使う日付
    ///
    /// # Errors
    ///
    /// 認証、フォルダ解決、アップロード、通知、削除のいずれかに
    /// 失敗した場合に最初のエラーを返す
    pub async fn execute(&self, video: &VideoFile, upload_date: NaiveDate) -> Result<UploadReport> {
        let storage = self.connector.connect().await?;
        info!("Authenticated with storage service");

        let folder = self
            .resolve_folder
            .execute(storage.as_ref(), upload_date)
            .await?;
        info!("Uploading to folder {} ({})", folder.title, folder.id);

        let metadata = NewRemoteFile::video(video.file_name(), &folder);
        let file = storage.upload_file(&metadata, video.path()).await?;
        info!("Uploaded {} as {}", file.title, file.id);

        let notification = if self.config.send_email {
            let sent = self
                .send_notification
                .execute(&self.config.notification, video, &file)
                .await?;
            Some(sent)
        } else {
            None
        };

        if self.config.delete_after_upload {
            self.video_repository.remove(video.path()).await?;
            info!("Deleted local file {}", video.path().display());
        }

        Ok(UploadReport {
            folder,
            file,
            notification,
            deleted: self.config.delete_after_upload,
        })
    }
}
