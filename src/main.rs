//! Motion Uploader
//!
//! motion が記録した動画を Google Drive にアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use motion_uploader::adapter::config::Config;
use motion_uploader::driver::{Args, MotionUploadWorkflow};

async fn run(args: &Args) -> Result<()> {
    // Load configuration
    let config = Config::load(&args.config)?;

    // Create workflow with injected configuration
    let workflow = MotionUploadWorkflow::new(config);

    workflow.execute(&args.video).await?;
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args).await {
        eprintln!("Error: [{}]", e);
        std::process::exit(1);
    }
}
