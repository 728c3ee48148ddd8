//! # Folder Naming Service
//!
//! 日付フォルダの命名規則

use chrono::NaiveDate;

/// 日付フォルダ名のフォーマット（例: 2015_03_21）
pub const DAILY_FOLDER_FORMAT: &str = "%Y_%m_%d";

/// フォルダ命名サービス
pub struct FolderNamingService;

impl FolderNamingService {
    /// 指定日の日付フォルダ名を返す
    ///
    /// # 例
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use motion_uploader::domain::services::folder_naming::FolderNamingService;
    ///
    /// let date = NaiveDate::from_ymd_opt(2015, 3, 21).unwrap();
    /// assert_eq!(FolderNamingService::daily_folder_name(date), "2015_03_21");
    /// ```
    pub fn daily_folder_name(date: NaiveDate) -> String {
        date.format(DAILY_FOLDER_FORMAT).to_string()
    }
}
