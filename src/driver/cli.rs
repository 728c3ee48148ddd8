//! CLI Argument Parsing
//!
//! CLIの引数解析

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

/// 動画をGoogle Driveにアップロードし、メールで通知するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "motion-uploader")]
#[command(about = "Motion Uploader - uploads videos to Google Drive", long_about = None)]
pub struct Args {
    /// Config file path
    pub config: PathBuf,

    /// Video file to upload
    pub video: PathBuf,
}

impl Args {
    /// 両方のパスが存在することを確認する
    ///
    /// 設定ファイルの解析より前に呼ばれる
    pub fn validate(&self) -> Result<()> {
        if !self.config.exists() {
            bail!("Config file does not exist [{}]", self.config.display());
        }
        if !self.video.exists() {
            bail!("Video file does not exist [{}]", self.video.display());
        }
        Ok(())
    }
}
