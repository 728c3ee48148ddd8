//! Authentication Module
//!
//! Google OAuth2 認証関連の機能

pub mod oauth;

pub use oauth::{OAuthCredentials, TokenRefresher};
