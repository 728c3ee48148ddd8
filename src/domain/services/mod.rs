//! # Domain Services
//!
//! エンティティに属さないビジネスルール

pub mod folder_naming;
pub mod message;
