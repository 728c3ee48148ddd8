//! # Resolve Folder Use Case
//!
//! アップロード先フォルダの解決ユースケース

use chrono::NaiveDate;
use log::info;

use crate::application::dto::upload_config::UploadConfig;
use crate::domain::entities::remote_file::RemoteFolder;
use crate::domain::error::{Result, UploaderError};
use crate::domain::repositories::storage_repository::{FolderQuery, StorageRepository};
use crate::domain::services::folder_naming::FolderNamingService;

/// フォルダ解決ユースケース
///
/// メインフォルダを検索し、日付フォルダモードでは当日のフォルダを
/// メインフォルダの下に検索・作成する。メインフォルダ自体は作成しない。
pub struct ResolveFolderUseCase {
    folder: String,
    daily_folders: bool,
}

impl ResolveFolderUseCase {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            folder: config.folder.clone(),
            daily_folders: config.daily_folders,
        }
    }

    /// アップロード先フォルダを返す
    ///
    /// # Arguments
    ///
    /// * `storage` - 認証済みストレージ
    /// * `date` - 日付フォルダ名に使う日付
    ///
    /// # Errors
    ///
    /// メインフォルダが存在しない場合に `UploaderError::FolderNotFound` を返す
    pub async fn execute(
        &self,
        storage: &dyn StorageRepository,
        date: NaiveDate,
    ) -> Result<RemoteFolder> {
        let main_folder = storage
            .find_folder(&FolderQuery::by_title(self.folder.as_str()))
            .await?
            .ok_or_else(|| UploaderError::FolderNotFound(self.folder.clone()))?;

        if !self.daily_folders {
            return Ok(main_folder);
        }

        let daily_name = FolderNamingService::daily_folder_name(date);
        let existing = storage
            .find_folder(&FolderQuery::child_of(daily_name.as_str(), &main_folder))
            .await?;

        match existing {
            Some(folder) => Ok(folder),
            None => {
                info!(
                    "Creating folder {} under {}",
                    daily_name, main_folder.title
                );
                storage.create_folder(&daily_name, &main_folder).await
            }
        }
    }
}
