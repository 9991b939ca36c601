//! HTTP access to the generation and log endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    error::ApiRejection,
    protocol::{ApiMessage, HelloQuery, HelloResponse, LogsQuery, LogsResponse},
};
use tracing::debug;
use url::Url;

use crate::{config::ClientSettings, error::ClientError};

pub const HELLO_ENDPOINT: &str = "/hello";
pub const LOGS_ENDPOINT: &str = "/logs";

#[async_trait]
pub trait LabApi: Send + Sync {
    async fn generate_points(&self, query: &HelloQuery) -> Result<HelloResponse, ClientError>;
    async fn fetch_logs(&self, query: LogsQuery) -> Result<LogsResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpLabApi {
    http: Client,
    base: Url,
}

impl HttpLabApi {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let base = Url::parse(&settings.api_url)?;
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()
            .map_err(|source| ClientError::Transport {
                endpoint: "client builder",
                source,
            })?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    async fn get_json<Q, T>(&self, endpoint: &'static str, query: &Q) -> Result<T, ClientError>
    where
        Q: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.base.join(endpoint.trim_start_matches('/'))?;
        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;
        debug!(endpoint, status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let message = serde_json::from_slice::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| String::from_utf8_lossy(&body).trim().to_string());
            return Err(ClientError::Rejected {
                endpoint,
                source: ApiRejection::new(status.as_u16(), message),
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Malformed { endpoint, source })
    }
}

#[async_trait]
impl LabApi for HttpLabApi {
    async fn generate_points(&self, query: &HelloQuery) -> Result<HelloResponse, ClientError> {
        self.get_json(HELLO_ENDPOINT, query).await
    }

    async fn fetch_logs(&self, query: LogsQuery) -> Result<LogsResponse, ClientError> {
        self.get_json(LOGS_ENDPOINT, &query).await
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
