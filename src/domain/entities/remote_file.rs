//! # Remote Folder / File Entities
//!
//! ストレージサービス上のフォルダとファイルのビジネス表現

/// 動画アップロード時に固定で使う MIME タイプ
pub const VIDEO_MIME_TYPE: &str = "video/avi";

/// リモートフォルダ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFolder {
    pub id: String,
    pub title: String,
}

impl RemoteFolder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// アップロードで作成されたリモートファイル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub title: String,
    pub mime_type: Option<String>,
    /// 共有用リンク（API が返さない場合もある）
    pub alternate_link: Option<String>,
    pub parent_ids: Vec<String>,
}

/// 作成するリモートファイルのメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRemoteFile {
    pub title: String,
    pub description: String,
    pub mime_type: String,
    pub parent_id: String,
}

impl NewRemoteFile {
    /// 動画ファイル用のメタデータを作成
    ///
    /// タイトルと説明はどちらもファイル名（拡張子込み）になる
    pub fn video(file_name: &str, parent: &RemoteFolder) -> Self {
        Self {
            title: file_name.to_string(),
            description: file_name.to_string(),
            mime_type: VIDEO_MIME_TYPE.to_string(),
            parent_id: parent.id.clone(),
        }
    }
}
