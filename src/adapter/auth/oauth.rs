//! Google OAuth2 Credentials
//!
//! 事前に発行されたアクセストークンの管理と自動リフレッシュ

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use log::info;
use serde::Deserialize;

use crate::domain::error::{Result, UploaderError};

/// デフォルトのトークンエンドポイント
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// 期限切れ直前のトークンもリフレッシュ対象にする猶予
const EXPIRY_SKEW_SECONDS: i64 = 60;

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// OAuth2 認証情報
///
/// 設定ファイルの `auth_token` に JSON で保存されている
#[derive(Clone, Deserialize)]
pub struct OAuthCredentials {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub token_expiry: Option<DateTime<Utc>>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for OAuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthCredentials")
            .field("client_id", &self.client_id)
            .field("token_expiry", &self.token_expiry)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// トークンエンドポイントのレスポンス
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// トークンエンドポイントのエラーレスポンス
#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

impl OAuthCredentials {
    /// JSON 文字列から認証情報を読み込む
    ///
    /// # Errors
    ///
    /// JSON として不正、または `access_token` が無い場合に
    /// `UploaderError::Configuration` を返す
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| UploaderError::Configuration(format!("Invalid auth_token: {}", e)))
    }

    /// 指定時刻の時点でトークンが期限切れ（または期限直前）かどうか
    ///
    /// 有効期限が不明な場合は期限切れとみなさない
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self.token_expiry {
            Some(expiry) => expiry - Duration::seconds(EXPIRY_SKEW_SECONDS) <= now,
            None => false,
        }
    }

    /// リフレッシュに必要な情報（refresh_token, client_id, client_secret）が揃っているか
    pub fn can_refresh(&self) -> bool {
        self.refresh_form().is_ok()
    }

    fn refresh_form(&self) -> Result<[(&'static str, &str); 4]> {
        let missing = |field: &str| {
            UploaderError::Authentication(format!(
                "Access token expired and auth_token has no {}",
                field
            ))
        };
        let refresh_token = self
            .refresh_token
            .as_deref()
            .ok_or_else(|| missing("refresh_token"))?;
        let client_id = self.client_id.as_deref().ok_or_else(|| missing("client_id"))?;
        let client_secret = self
            .client_secret
            .as_deref()
            .ok_or_else(|| missing("client_secret"))?;

        Ok([
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
    }
}

/// アクセストークンのリフレッシュ
pub struct TokenRefresher {
    http: reqwest::Client,
}

impl TokenRefresher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// 有効なアクセストークンを返す
    ///
    /// 期限切れの場合はリフレッシュトークンで新しいトークンを取得する
    ///
    /// # Errors
    ///
    /// リフレッシュが拒否された場合に `UploaderError::Authentication` を返す
    pub async fn access_token(&self, credentials: &OAuthCredentials) -> Result<String> {
        if !credentials.is_expired(Utc::now()) {
            return Ok(credentials.access_token.clone());
        }

        info!("Access token expired, refreshing");
        self.refresh(credentials).await
    }

    /// リフレッシュトークンで新しいアクセストークンを取得する
    pub async fn refresh(&self, credentials: &OAuthCredentials) -> Result<String> {
        let form = credentials.refresh_form()?;

        let response = self
            .http
            .post(&credentials.token_uri)
            .form(&form)
            .send()
            .await
            .map_err(|e| UploaderError::Authentication(format!("Token refresh failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploaderError::Authentication(describe_token_error(
                status.as_u16(),
                &body,
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            UploaderError::Authentication(format!("Invalid token response: {}", e))
        })?;

        if let Some(expires_in) = token.expires_in {
            info!("Refreshed access token (expires in {}s)", expires_in);
        }

        Ok(token.access_token)
    }
}

/// トークンエンドポイントのエラーを説明する文字列に変換
fn describe_token_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<TokenErrorResponse>(body) {
        Ok(err) => match err.error_description {
            Some(description) => format!("{} ({}): {}", err.error, status, description),
            None => format!("{} ({})", err.error, status),
        },
        Err(_) => format!("Token refresh rejected with status {}", status),
    }
}
