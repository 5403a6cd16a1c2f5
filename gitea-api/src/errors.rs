//! Errors produced by the Gitea REST client.

use serde::Deserialize;
use thiserror::Error;

/// Convenient alias for Gitea client results.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single Gitea API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("gitea responded with status {status}: {message}")]
    Status {
        status: u16,
        message: String,
        /// Documentation link Gitea attaches to some errors.
        url: Option<String>,
    },

    /// Timeout, DNS, TLS or connection failure.
    #[error("network error: {0}")]
    Transport(String),

    /// A 2xx body that does not match the expected shape.
    #[error("cannot decode gitea response: {0}")]
    Decode(String),

    /// The configured base URL cannot be used.
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// Builds a status error from the raw body of a failed response.
    ///
    /// Gitea reports errors as `{"message": "...", "url": "..."}`; anything
    /// else is kept verbatim as the message.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct GiteaErrorBody {
            #[serde(default)]
            message: String,
            #[serde(default)]
            url: Option<String>,
        }

        match serde_json::from_str::<GiteaErrorBody>(body) {
            Ok(parsed) => ApiError::Status {
                status,
                message: parsed.message,
                url: parsed.url.filter(|u| !u.is_empty()),
            },
            Err(_) => ApiError::Status {
                status,
                message: body.trim().to_string(),
                url: None,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return ApiError::Decode(e.to_string());
        }
        if let Some(status) = e.status() {
            return ApiError::Status {
                status: status.as_u16(),
                message: e.to_string(),
                url: None,
            };
        }
        ApiError::Transport(e.to_string())
    }
}
