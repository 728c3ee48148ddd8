//! # Storage Repository Trait
//!
//! クラウドストレージ（フォルダ検索・作成、ファイルアップロード）を抽象化

use std::path::Path;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::remote_file::{NewRemoteFile, RemoteFile, RemoteFolder};
use crate::domain::error::Result;

/// フォルダ検索条件
///
/// タイトルは完全一致（大文字小文字を区別）で比較される
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderQuery {
    pub title: String,
    /// 親フォルダで絞り込む場合のID
    pub parent_id: Option<String>,
}

impl FolderQuery {
    /// タイトルだけで検索する
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            parent_id: None,
        }
    }

    /// 親フォルダの直下を検索する
    pub fn child_of(title: impl Into<String>, parent: &RemoteFolder) -> Self {
        Self {
            title: title.into(),
            parent_id: Some(parent.id.clone()),
        }
    }
}

/// 認証済みストレージセッション
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// タイトルが完全一致する最初のフォルダを返す
    ///
    /// # Errors
    ///
    /// 検索リクエストが失敗した場合にエラーを返す
    async fn find_folder(&self, query: &FolderQuery) -> Result<Option<RemoteFolder>>;

    /// 親フォルダの下に新しいフォルダを作成
    async fn create_folder(&self, title: &str, parent: &RemoteFolder) -> Result<RemoteFolder>;

    /// ファイルをアップロードし、作成されたファイルを返す
    ///
    /// 大きなファイルでも完了するまで戻らない
    ///
    /// # Errors
    ///
    /// 通信エラー、API による拒否の場合に `UploaderError::Upload` を返す
    async fn upload_file(&self, metadata: &NewRemoteFile, path: &Path) -> Result<RemoteFile>;
}

/// ストレージへの接続（認証）
///
/// 認証に成功すると `StorageRepository` を返す。フォルダ操作や
/// アップロードは必ずこの後に行われる。
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorageConnector: Send + Sync {
    /// # Errors
    ///
    /// 認証情報が拒否された場合に `UploaderError::Authentication` を返す
    async fn connect(&self) -> Result<Box<dyn StorageRepository>>;
}
