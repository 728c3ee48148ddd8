//! # Video Repository Trait
//!
//! ローカル動画ファイルの後片付けを抽象化

use std::path::Path;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::error::Result;

/// ローカル動画リポジトリ
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// 動画ファイルを削除する
    ///
    /// # Errors
    ///
    /// ファイルが存在しない、権限がない場合に
    /// `UploaderError::LocalCleanup` を返す
    async fn remove(&self, path: &Path) -> Result<()>;
}
