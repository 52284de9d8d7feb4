use thiserror::Error;

pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed api key")]
    MalformedApiKey,
    #[error("malformed url: {0}")]
    MalformedUrl(#[from] url::ParseError),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("mailjet error {}: {}", .0.status_code, .0.error_message)]
    Api(ApiError),
    #[error("message rejected: {0}")]
    Rejected(String),
}

/// Top-level error body returned by the Mailjet API.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ApiError {
    #[serde(rename = "StatusCode", default)]
    pub status_code: u16,
    #[serde(rename = "ErrorMessage", default)]
    pub error_message: String,
    #[serde(rename = "ErrorIdentifier", default)]
    pub error_identifier: String,
}

impl Error {
    pub fn api(error: ApiError) -> Self {
        Self::Api(error)
    }

    pub fn rejected<S: ToString>(msg: S) -> Self {
        Self::Rejected(msg.to_string())
    }
}

pub(crate) fn decode_api_error(status: reqwest::StatusCode, bytes: &[u8]) -> Error {
    match serde_json::from_slice::<ApiError>(bytes) {
        Ok(mut error) => {
            if error.status_code == 0 {
                error.status_code = status.as_u16();
            }
            Error::api(error)
        }
        Err(_) => Error::api(ApiError {
            status_code: status.as_u16(),
            error_message: String::from_utf8_lossy(bytes).into_owned(),
            error_identifier: String::new(),
        }),
    }
}
