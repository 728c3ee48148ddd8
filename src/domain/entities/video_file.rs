//! # VideoFile Entity
//!
//! アップロード対象のローカル動画ファイル

use std::path::{Path, PathBuf};

/// サムネイル画像の固定ファイル名（動画と同じディレクトリに置かれる）
pub const THUMBNAIL_FILE_NAME: &str = "motion.jpg";

/// ローカル動画ファイル
///
/// コマンドライン引数で渡されたパスと、そこから導出される値を保持する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    path: PathBuf,
    file_name: String,
    camera_name: Option<String>,
}

impl VideoFile {
    /// パスから動画ファイルを作成します。
    ///
    /// ファイル名（拡張子込み）と、直上のディレクトリ名から
    /// カメラ名を導出します。
    ///
    /// # 例
    ///
    /// ```
    /// use motion_uploader::domain::entities::video_file::VideoFile;
    ///
    /// let video = VideoFile::new("/var/motion/garden/01-20150321.avi");
    /// assert_eq!(video.file_name(), "01-20150321.avi");
    /// assert_eq!(video.camera_name(), Some("garden"));
    /// ```
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let camera_name = path
            .parent()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().to_string())
            .filter(|n| !n.is_empty());

        Self {
            path,
            file_name,
            camera_name,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 拡張子を含むファイル名
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 直上のディレクトリ名（ルート直下やディレクトリ無しの場合は None）
    pub fn camera_name(&self) -> Option<&str> {
        self.camera_name.as_deref()
    }

    /// 同じディレクトリにあるサムネイル画像のパス
    pub fn thumbnail_path(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) => dir.join(THUMBNAIL_FILE_NAME),
            None => PathBuf::from(THUMBNAIL_FILE_NAME),
        }
    }
}
