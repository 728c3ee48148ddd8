//! Google Drive Client
//!
//! StorageRepository / StorageConnector の Google Drive (REST v2) 実装

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::StatusCode;
use serde::Deserialize;

use super::models::{ApiErrorResponse, DriveFile, FileList, FileMetadata, FOLDER_MIME_TYPE};
use super::resumable::ResumableUpload;
use crate::adapter::auth::{OAuthCredentials, TokenRefresher};
use crate::domain::entities::remote_file::{NewRemoteFile, RemoteFile, RemoteFolder};
use crate::domain::error::{Result, UploaderError};
use crate::domain::repositories::storage_repository::{
    FolderQuery, StorageConnector, StorageRepository,
};

pub const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v2";
pub const DRIVE_UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v2";

const REQUEST_TIMEOUT_SECS: u64 = 300;
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Drive API 用の HTTP クライアントを作成
///
/// `308 Resume Incomplete` をリダイレクトとして扱わないよう、リダイレクトは無効にする
pub fn build_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|e| UploaderError::Upload(format!("Failed to create HTTP client: {}", e)))
}

/// Drive の検索クエリ用に文字列をエスケープする
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

/// フォルダ検索クエリ（`q` パラメータ）を組み立てる
pub fn folder_query(query: &FolderQuery) -> String {
    let mut q = format!(
        "title = '{}' and mimeType = '{}' and trashed = false",
        escape_query_value(&query.title),
        FOLDER_MIME_TYPE
    );
    if let Some(parent_id) = &query.parent_id {
        q.push_str(&format!(" and '{}' in parents", escape_query_value(parent_id)));
    }
    q
}

/// エラーレスポンスを UploaderError に変換
///
/// 401 は認証エラー、それ以外はアップロードエラーとして扱う
pub(crate) async fn error_from_response(
    response: reqwest::Response,
    context: &str,
) -> UploaderError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    let message = format!("{}: {} {}", context, status.as_u16(), detail.trim());
    if status == StatusCode::UNAUTHORIZED {
        UploaderError::Authentication(message)
    } else {
        UploaderError::Upload(message)
    }
}

/// 認証済み Google Drive クライアント
pub struct DriveClient {
    http: reqwest::Client,
    access_token: String,
    api_url: String,
    upload_url: String,
}

impl DriveClient {
    pub fn new(http: reqwest::Client, access_token: String) -> Self {
        Self::with_urls(http, access_token, DRIVE_API_URL, DRIVE_UPLOAD_URL)
    }

    /// API とアップロードのベースURLを指定して作成
    pub fn with_urls(
        http: reqwest::Client,
        access_token: String,
        api_url: impl Into<String>,
        upload_url: impl Into<String>,
    ) -> Self {
        Self {
            http,
            access_token,
            api_url: api_url.into(),
            upload_url: upload_url.into(),
        }
    }
}

#[async_trait]
impl StorageRepository for DriveClient {
    async fn find_folder(&self, query: &FolderQuery) -> Result<Option<RemoteFolder>> {
        let q = folder_query(query);
        debug!("Searching folders: {}", q);

        let response = self
            .http
            .get(format!("{}/files", self.api_url))
            .bearer_auth(&self.access_token)
            .query(&[("q", q.as_str()), ("maxResults", "100")])
            .send()
            .await
            .map_err(|e| UploaderError::Upload(format!("Folder search failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Folder search failed").await);
        }

        let list: FileList = response
            .json()
            .await
            .map_err(|e| UploaderError::Upload(format!("Invalid folder list: {}", e)))?;

        // 検索は大文字小文字を区別しない場合があるので完全一致で絞り込む
        Ok(list
            .items
            .into_iter()
            .find(|f| f.title == query.title)
            .map(RemoteFolder::from))
    }

    async fn create_folder(&self, title: &str, parent: &RemoteFolder) -> Result<RemoteFolder> {
        let response = self
            .http
            .post(format!("{}/files", self.api_url))
            .bearer_auth(&self.access_token)
            .json(&FileMetadata::folder(title, &parent.id))
            .send()
            .await
            .map_err(|e| UploaderError::Upload(format!("Folder creation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(error_from_response(response, "Folder creation failed").await);
        }

        let folder: DriveFile = response
            .json()
            .await
            .map_err(|e| UploaderError::Upload(format!("Invalid folder response: {}", e)))?;

        info!("Created folder {} ({})", folder.title, folder.id);
        Ok(folder.into())
    }

    async fn upload_file(&self, metadata: &NewRemoteFile, path: &Path) -> Result<RemoteFile> {
        let total = tokio::fs::metadata(path)
            .await
            .map_err(|e| UploaderError::Upload(format!("Failed to read {}: {}", path.display(), e)))?
            .len();

        let upload = ResumableUpload::initiate(
            &self.http,
            &self.access_token,
            &self.upload_url,
            &FileMetadata::from(metadata),
            total,
        )
        .await?;

        let file = upload.send_file(path).await?;
        Ok(file.into())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AboutUser {
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct About {
    user: AboutUser,
}

/// Google Drive への接続（OAuth2 トークン）
pub struct DriveConnector {
    http: reqwest::Client,
    credentials: OAuthCredentials,
    api_url: String,
    upload_url: String,
}

impl DriveConnector {
    pub fn new(credentials: OAuthCredentials) -> Result<Self> {
        Self::with_urls(credentials, DRIVE_API_URL, DRIVE_UPLOAD_URL)
    }

    /// API とアップロードのベースURLを指定して作成
    pub fn with_urls(
        credentials: OAuthCredentials,
        api_url: impl Into<String>,
        upload_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: build_http_client()?,
            credentials,
            api_url: api_url.into(),
            upload_url: upload_url.into(),
        })
    }

    async fn about(&self, access_token: &str) -> Result<reqwest::Response> {
        self.http
            .get(format!("{}/about", self.api_url))
            .bearer_auth(access_token)
            .query(&[("fields", "user")])
            .send()
            .await
            .map_err(|e| UploaderError::Authentication(format!("Drive unreachable: {}", e)))
    }
}

#[async_trait]
impl StorageConnector for DriveConnector {
    async fn connect(&self) -> Result<Box<dyn StorageRepository>> {
        let refresher = TokenRefresher::new(self.http.clone());
        let mut access_token = refresher.access_token(&self.credentials).await?;
        let refreshed = access_token != self.credentials.access_token;

        // トークンが受け付けられるか確認する
        let mut response = self.about(&access_token).await?;

        // 有効期限が不明なトークンは 401 で初めて失効が分かる
        if response.status() == StatusCode::UNAUTHORIZED
            && !refreshed
            && self.credentials.can_refresh()
        {
            info!("Access token rejected, refreshing");
            access_token = refresher.refresh(&self.credentials).await?;
            response = self.about(&access_token).await?;
        }

        if !response.status().is_success() {
            return Err(match error_from_response(response, "Drive rejected credentials").await {
                UploaderError::Upload(message) => UploaderError::Authentication(message),
                other => other,
            });
        }

        let about: About = response
            .json()
            .await
            .map_err(|e| UploaderError::Authentication(format!("Invalid about response: {}", e)))?;
        info!(
            "Connected to Google Drive as {}",
            about.user.display_name.as_deref().unwrap_or("unknown user")
        );

        Ok(Box::new(DriveClient::with_urls(
            self.http.clone(),
            access_token,
            self.api_url.clone(),
            self.upload_url.clone(),
        )))
    }
}
