use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, RequestBuilder, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

mod error;

pub mod auth;
pub mod calendar;
pub mod sheets;

pub use error::{ApiError, Error, Result};

/// The default timeout for API requests
pub const DEFAULT_TIMEOUT: u64 = 20;
/// A utility constant to pass an empty query slice to the various client
/// fetch functions
pub const NO_QUERY: &[&str; 0] = &[""; 0];

pub const CALENDAR_ENDPOINT: &str = "https://www.googleapis.com/calendar/v3";
pub const SHEETS_ENDPOINT: &str = "https://sheets.googleapis.com/v4";

/// Bearer-token client for the Google Calendar and Sheets REST APIs. The
/// token comes from [`auth::Authenticator::access_token`].
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    auth_header: HeaderValue,
    calendar_endpoint: String,
    sheets_endpoint: String,
}

impl Client {
    pub fn new(access_token: &str) -> Result<Self> {
        Self::new_with_timeout(access_token, DEFAULT_TIMEOUT)
    }

    pub fn new_with_timeout(access_token: &str, timeout: u64) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|_| Error::MalformedToken)?;
        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(timeout))
            .build()?;
        Ok(Self {
            client,
            auth_header,
            calendar_endpoint: CALENDAR_ENDPOINT.to_string(),
            sheets_endpoint: SHEETS_ENDPOINT.to_string(),
        })
    }

    pub fn with_calendar_endpoint(mut self, endpoint: &str) -> Self {
        self.calendar_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    pub fn with_sheets_endpoint(mut self, endpoint: &str) -> Self {
        self.sheets_endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    fn request(&self, method: Method, endpoint: &str, path: &str) -> Result<RequestBuilder> {
        let url = Url::parse(&format!("{endpoint}{path}"))?;

        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, self.auth_header.clone());
        headers.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(self.client.request(method, url).headers(headers))
    }

    async fn fetch<T, Q>(&self, endpoint: &str, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .request(Method::GET, endpoint, path)?
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await?;
            return Err(error::decode_api_error(status, &bytes));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn fetch_calendar<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let endpoint = self.calendar_endpoint.clone();
        self.fetch(&endpoint, path, query).await
    }

    pub(crate) async fn fetch_sheets<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let endpoint = self.sheets_endpoint.clone();
        self.fetch(&endpoint, path, query).await
    }
}
