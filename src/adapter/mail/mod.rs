//! Mail Adapter
//!
//! SMTP による通知メール送信

pub mod smtp;

pub use smtp::SmtpMailer;
