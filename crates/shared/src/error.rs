use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The request never completed, timed out, or the backend rejected it.
    NetworkFailure,
    /// The body arrived but did not have the expected JSON shape.
    MalformedResponse,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::NetworkFailure => "network failure",
            ErrorKind::MalformedResponse => "malformed response",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("backend rejected request with status {status}: {message}")]
pub struct ApiRejection {
    pub status: u16,
    pub message: String,
}

impl ApiRejection {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}
