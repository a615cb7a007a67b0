//! HTTP client for the plant store.

use thiserror::Error;

use crate::models::{Collection, Plant};
use crate::server::{SaveResponse, API_PATH};

/// Errors that can occur while talking to the store.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to store failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Store rejected save: {0}")]
    Rejected(String),
}

/// Client for the store's load/save endpoint.
#[derive(Debug, Clone)]
pub struct StoreClient {
    base_url: String,
    endpoint: String,
    http: reqwest::Client,
}

impl StoreClient {
    /// Creates a client for the server at `server_url`
    /// (e.g., "http://127.0.0.1:8080").
    pub fn new(server_url: &str) -> Self {
        let base_url = server_url.trim_end_matches('/').to_string();
        Self {
            endpoint: format!("{}{}", base_url, API_PATH),
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the full collection.
    pub async fn load(&self) -> Result<Collection, ClientError> {
        let plants = self
            .http
            .get(&self.endpoint)
            .query(&[("action", "load")])
            .send()
            .await?
            .error_for_status()?
            .json::<Collection>()
            .await?;

        tracing::debug!("Loaded {} plant(s) from {}", plants.len(), self.endpoint);
        Ok(plants)
    }

    /// Overwrites the stored collection with `plants`.
    ///
    /// The server answers with a JSON body even on failure, so its message
    /// is surfaced instead of the bare status code.
    pub async fn save(&self, plants: &[Plant]) -> Result<SaveResponse, ClientError> {
        let data = serde_json::to_string(plants)?;

        let response: SaveResponse = self
            .http
            .post(&self.endpoint)
            .form(&[("action", "save"), ("data", data.as_str())])
            .send()
            .await?
            .json()
            .await?;

        if response.success {
            Ok(response)
        } else {
            Err(ClientError::Rejected(response.message))
        }
    }

    /// Returns true if the server answers its health check.
    pub async fn check_server(&self) -> bool {
        let health_url = format!("{}/health", self.base_url);
        match self.http.get(&health_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health check failed: {}", e);
                false
            }
        }
    }
}
