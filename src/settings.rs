use crate::{email::Mailer, Context, Result};
use config::{Config, Environment, File};
use gapi::auth::{Authenticator, CALENDAR_READONLY_SCOPE, SHEETS_READONLY_SCOPE};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log")]
    pub log: String,
    #[serde(default)]
    pub db: DatabaseSettings,
    pub google: GoogleSettings,
    pub mailjet: MailjetSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default = "default_quote_url")]
    pub quote_url: String,
}

impl Settings {
    /// Settings are loaded from the file in the given path, with OPT_
    /// prefixed environment variables taking precedence.
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Config::builder()
            .add_source(File::with_name(path.to_str().expect("file name")).required(false))
            .add_source(Environment::with_prefix("OPT").separator("__"))
            .build()
            .and_then(|config| config.try_deserialize())?)
    }
}

fn default_log() -> String {
    "opt_reminders=info,opt_db=info,gapi=info,mailjet=info".to_string()
}

fn default_quote_url() -> String {
    crate::quotes::DEFAULT_QUOTE_URL.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_db_url")]
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_db_url(),
        }
    }
}

fn default_db_url() -> String {
    "sqlite://app.db".to_string()
}

impl DatabaseSettings {
    pub async fn connect(&self) -> Result<SqlitePool> {
        db::connect(&self.url)
            .await
            .context(format!("opening database {}", self.url))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSettings {
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    #[serde(default = "default_calendars")]
    pub calendars: Vec<String>,
    pub spreadsheet_id: Option<String>,
    #[serde(default = "default_summary_range")]
    pub summary_range: String,
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_token_file() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_calendars() -> Vec<String> {
    vec!["primary".to_string()]
}

fn default_summary_range() -> String {
    "Student summary!A1:Q".to_string()
}

impl GoogleSettings {
    /// One token covers both scopes, so a single consent works for the
    /// calendar fetch and the spreadsheet report.
    pub async fn client(&self) -> Result<gapi::Client> {
        let authenticator = Authenticator::new(
            &self.credentials_file,
            &self.token_file,
            &[CALENDAR_READONLY_SCOPE, SHEETS_READONLY_SCOPE],
        )
        .context("reading google credentials")?;
        let token = authenticator
            .access_token()
            .await
            .context("obtaining google access token")?;
        Ok(gapi::Client::new(&token)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailjetSettings {
    pub api_key: String,
    pub api_secret: String,
    pub from_email: String,
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Receives the report emails and a BCC of every reminder.
    pub admin_email: String,
    /// Reply-to fallback when a student has no tutor on file.
    #[serde(default)]
    pub support_email: Option<String>,
}

fn default_from_name() -> String {
    "Open Path Tutoring".to_string()
}

impl MailjetSettings {
    pub fn client(&self) -> Result<mailjet::Client> {
        Ok(mailjet::client::from_api_key(
            &self.api_key,
            &self.api_secret,
        )?)
    }

    pub fn mailer(&self) -> Result<Mailer> {
        Mailer::new(self)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_weekly_day")]
    pub weekly_day: chrono::Weekday,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            weekly_day: default_weekly_day(),
        }
    }
}

fn default_weekly_day() -> chrono::Weekday {
    chrono::Weekday::Fri
}
