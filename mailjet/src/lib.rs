use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method, RequestBuilder, Url,
};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

mod error;
pub mod send;

pub use error::{ApiError, Error, Result};

/// The default timeout for API requests
pub const DEFAULT_TIMEOUT: u64 = 20;

pub const API_ENDPOINT: &str = "https://api.mailjet.com";

/// Mailjet Send API client. Authenticates with the api key/secret pair as
/// basic auth.
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    auth_header: HeaderValue,
    endpoint: String,
}

pub mod client {
    use super::*;

    pub fn from_api_key(key: &str, secret: &str) -> Result<Client> {
        Client::new(key, secret)
    }
}

impl Client {
    pub fn new(key: &str, secret: &str) -> Result<Self> {
        Self::new_with_timeout(key, secret, DEFAULT_TIMEOUT)
    }

    pub fn new_with_timeout(key: &str, secret: &str, timeout: u64) -> Result<Self> {
        use base64::Engine;
        let encoded =
            base64::engine::general_purpose::STANDARD.encode(format!("{key}:{secret}").as_bytes());
        let auth_header = HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| Error::MalformedApiKey)?;
        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(timeout))
            .build()?;
        Ok(Self {
            client,
            auth_header,
            endpoint: API_ENDPOINT.to_string(),
        })
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = Url::parse(&format!("{}{path}", self.endpoint))?;

        let mut headers = HeaderMap::new();
        headers.append(AUTHORIZATION, self.auth_header.clone());
        headers.append(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Ok(self.client.request(method, url).headers(headers))
    }

    pub async fn post<T, R>(&self, path: &str, json: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self.request(Method::POST, path)?.json(json).send().await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(error::decode_api_error(status, &bytes));
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}
