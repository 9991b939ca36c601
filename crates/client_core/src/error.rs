use shared::error::{ApiRejection, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {endpoint} was rejected: {source}")]
    Rejected {
        endpoint: &'static str,
        #[source]
        source: ApiRejection,
    },
    #[error("unexpected response body from {endpoint}: {source}")]
    Malformed {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { .. }
            | ClientError::Rejected { .. }
            | ClientError::InvalidUrl(_) => ErrorKind::NetworkFailure,
            ClientError::Malformed { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport { source, .. } if source.is_timeout())
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid api url '{raw}': {source}")]
    ApiUrl {
        raw: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid request timeout '{raw}'")]
    Timeout { raw: String },
}
