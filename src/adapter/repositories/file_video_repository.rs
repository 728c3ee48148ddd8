//! File Video Repository Implementation
//!
//! VideoRepositoryのファイルシステム実装

use async_trait::async_trait;
use log::info;
use std::path::Path;

use crate::domain::error::{Result, UploaderError};
use crate::domain::repositories::video_repository::VideoRepository;

/// ファイルシステムベースの動画リポジトリ
pub struct FileVideoRepository;

impl FileVideoRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileVideoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VideoRepository for FileVideoRepository {
    async fn remove(&self, path: &Path) -> Result<()> {
        tokio::fs::remove_file(path)
            .await
            .map_err(|source| UploaderError::LocalCleanup {
                path: path.to_path_buf(),
                source,
            })?;

        info!("Removed {}", path.display());
        Ok(())
    }
}
