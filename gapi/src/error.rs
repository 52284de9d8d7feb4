use thiserror::Error;

pub type Result<T = ()> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed access token")]
    MalformedToken,
    #[error("malformed url: {0}")]
    MalformedUrl(#[from] url::ParseError),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("google api error {}: {}", .0.code, .0.message)]
    Api(ApiError),
    #[error("oauth: {0}")]
    Auth(String),
}

/// Error body returned by the Google APIs.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

impl Error {
    pub fn api(error: ApiError) -> Self {
        Self::Api(error)
    }

    pub fn auth<S: ToString>(msg: S) -> Self {
        Self::Auth(msg.to_string())
    }
}

pub(crate) fn decode_api_error(status: reqwest::StatusCode, bytes: &[u8]) -> Error {
    match serde_json::from_slice::<ApiErrorBody>(bytes) {
        Ok(body) => Error::api(body.error),
        Err(_) => Error::api(ApiError {
            code: status.as_u16(),
            message: String::from_utf8_lossy(bytes).into_owned(),
            status: None,
        }),
    }
}
