//! Installed-app OAuth2 flow for the Google APIs.
//!
//! Credentials come from a `credentials.json` in Google's installed-app
//! format. The granted token is persisted to `token.json` in the field
//! layout the google-auth library writes, so a token file issued by the
//! original tooling keeps working. An expired token is refreshed with the
//! stored refresh token; when that fails the console consent flow runs and
//! the operator pastes the authorization code.

use crate::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::{
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};
use url::Url;

pub const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";

pub const CALENDAR_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Slack applied when deciding whether a stored token is still usable.
const EXPIRY_LEEWAY_SECONDS: i64 = 60;

#[derive(Debug, Deserialize)]
pub struct InstalledCredentials {
    pub installed: ClientSecret,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecret {
    pub client_id: String,
    pub client_secret: String,
    pub auth_uri: String,
    pub token_uri: String,
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl InstalledCredentials {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Persisted token state, `token.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    pub expiry: DateTime<Utc>,
}

impl StoredToken {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, path: &Path) -> Result {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn is_expired(&self) -> bool {
        self.expiry <= Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECONDS)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    refresh_token: Option<String>,
}

#[derive(Debug)]
pub struct Authenticator {
    secret: ClientSecret,
    token_path: PathBuf,
    token_endpoint: String,
    scopes: Vec<String>,
    client: reqwest::Client,
}

impl Authenticator {
    pub fn new(credentials_path: &Path, token_path: &Path, scopes: &[&str]) -> Result<Self> {
        let credentials = InstalledCredentials::from_file(credentials_path)?;
        Ok(Self {
            secret: credentials.installed,
            token_path: token_path.to_path_buf(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            scopes: scopes.iter().map(|scope| scope.to_string()).collect(),
            client: reqwest::Client::new(),
        })
    }

    pub fn with_token_endpoint(mut self, endpoint: &str) -> Self {
        self.token_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Produce a usable access token, persisting any newly granted token
    /// before returning.
    pub async fn access_token(&self) -> Result<String> {
        let stored = match StoredToken::from_file(&self.token_path) {
            Ok(stored) if !stored.is_expired() => return Ok(stored.token),
            Ok(stored) => Some(stored),
            Err(_) => None,
        };

        let token = match stored.as_ref().and_then(|tok| tok.refresh_token.clone()) {
            Some(refresh_token) => match self.refresh(&refresh_token).await {
                Ok(token) => token,
                Err(err) => {
                    tracing::warn!(?err, "token refresh failed, running consent flow");
                    self.consent().await?
                }
            },
            None => self.consent().await?,
        };

        token.save(&self.token_path)?;
        Ok(token.token)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<StoredToken> {
        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let response = self.exchange(&params).await?;
        // A refresh grant usually omits the refresh token; keep the one we
        // already hold.
        Ok(self.stored(
            response.access_token,
            response
                .refresh_token
                .or_else(|| Some(refresh_token.to_string())),
            response.expires_in,
        ))
    }

    async fn consent(&self) -> Result<StoredToken> {
        let redirect_uri = self
            .secret
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or("http://localhost");

        let authorize_url = Url::parse_with_params(
            &self.secret.auth_uri,
            &[
                ("client_id", self.secret.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", &self.scopes.join(" ")),
                ("access_type", "offline"),
                ("prompt", "consent"),
            ],
        )?;

        let code = prompt_for_code(&authorize_url)?;

        let params = [
            ("client_id", self.secret.client_id.as_str()),
            ("client_secret", self.secret.client_secret.as_str()),
            ("code", code.as_str()),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ];
        let response = self.exchange(&params).await?;
        Ok(self.stored(
            response.access_token,
            response.refresh_token,
            response.expires_in,
        ))
    }

    async fn exchange(&self, params: &[(&str, &str)]) -> Result<TokenResponse> {
        let response = self
            .client
            .post(&self.token_endpoint)
            .form(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!("token endpoint {status}: {body}")));
        }

        Ok(response.json().await?)
    }

    fn stored(
        &self,
        access_token: String,
        refresh_token: Option<String>,
        expires_in: i64,
    ) -> StoredToken {
        StoredToken {
            token: access_token,
            refresh_token,
            token_uri: self.secret.token_uri.clone(),
            client_id: self.secret.client_id.clone(),
            client_secret: self.secret.client_secret.clone(),
            scopes: self.scopes.clone(),
            expiry: Utc::now() + Duration::seconds(expires_in),
        }
    }
}

fn prompt_for_code(authorize_url: &Url) -> Result<String> {
    let mut stdout = io::stdout();
    writeln!(stdout, "Open this URL in a browser to authorize access:")?;
    writeln!(stdout, "\n{authorize_url}\n")?;
    write!(stdout, "Enter the authorization code: ")?;
    stdout.flush()?;

    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;
    let code = code.trim();
    if code.is_empty() {
        return Err(Error::auth("no authorization code entered"));
    }
    Ok(code.to_string())
}
