//! Adapter Layer
//!
//! 外部システム（Google Drive, SMTP, ファイルシステム）との統合

pub mod auth;
pub mod config;
pub mod drive;
pub mod mail;
pub mod repositories;
