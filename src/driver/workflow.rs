//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use chrono::Local;
use log::info;

use crate::adapter::config::Config;
use crate::adapter::drive::client::DriveConnector;
use crate::adapter::mail::SmtpMailer;
use crate::adapter::repositories::file_video_repository::FileVideoRepository;
use crate::application::use_cases::upload_video::{UploadReport, UploadVideoUseCase};
use crate::domain::entities::video_file::VideoFile;

/// 結果のサマリーを表示する
pub fn print_report(report: &UploadReport) {
    println!(
        "✓ Uploaded {} to folder {}",
        report.file.title, report.folder.title
    );
    if let Some(link) = &report.file.alternate_link {
        println!("  Link: {}", link);
    }
    if let Some(notification) = &report.notification {
        println!(
            "✓ Notified {} recipient(s): {}",
            notification.recipients.len(),
            notification.recipients.join(", ")
        );
    }
    if report.deleted {
        println!("✓ Deleted local file");
    }
}

/// Motion Upload Workflow
pub struct MotionUploadWorkflow {
    config: Config,
}

impl MotionUploadWorkflow {
    /// Create a new workflow instance with injected configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the upload workflow for one video file
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn execute(&self, video_path: &Path) -> Result<UploadReport> {
        info!("Starting Motion uploader...");

        let upload_config = self.config.upload_config();
        println!("✓ Using configuration:");
        println!("  Folder: {}", upload_config.folder);
        println!("  Daily folders: {}", upload_config.daily_folders);
        println!("  Send email: {}", upload_config.send_email);
        println!("  Delete after upload: {}", upload_config.delete_after_upload);

        // Repository implementations
        let connector = Arc::new(DriveConnector::new(self.config.drive.credentials()?)?);
        let mailer = Arc::new(SmtpMailer::from_config(&self.config.gmail));
        let video_repository = Arc::new(FileVideoRepository::new());

        let use_case =
            UploadVideoUseCase::new(upload_config, connector, mailer, video_repository);

        let video = VideoFile::new(video_path);
        let report = use_case
            .execute(&video, Local::now().date_naive())
            .await?;

        print_report(&report);
        println!("✓ Upload complete!");

        Ok(report)
    }
}
