//! HTTP access to the HR backend

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use shared::LookupTable;
use shared::client::{SubmitAck, VerifyResponse};

use crate::{ClientConfig, ClientError, ClientResult};

/// Remote API consumed by the form controllers.
///
/// The network implementation is [`HttpClient`]; tests drive controllers
/// through an in-memory implementation instead.
#[async_trait]
pub trait HrApi: Send + Sync {
    /// GET /fetch-lookup-values-no-input
    async fn fetch_lookups(&self) -> ClientResult<LookupTable>;

    /// GET /employee-verify/{identifier}
    async fn verify_employee(&self, identifier: &str) -> ClientResult<VerifyResponse>;

    /// GET /{path}/{identifier}, yielding zero or more raw record rows.
    async fn fetch_records(
        &self,
        path: &str,
        identifier: &str,
    ) -> ClientResult<Vec<Map<String, Value>>>;

    /// POST /{path} with a JSON body.
    async fn submit(&self, path: &str, body: &Map<String, Value>) -> ClientResult<SubmitAck>;
}

/// HTTP client for making network requests to the HR backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new HTTP client from configuration.
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "GET");
        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response. Non-2xx is uniformly a failure.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        response.json().await.map_err(Into::into)
    }
}

#[async_trait]
impl HrApi for HttpClient {
    async fn fetch_lookups(&self) -> ClientResult<LookupTable> {
        self.get("fetch-lookup-values-no-input").await
    }

    async fn verify_employee(&self, identifier: &str) -> ClientResult<VerifyResponse> {
        self.get(&format!("employee-verify/{identifier}")).await
    }

    async fn fetch_records(
        &self,
        path: &str,
        identifier: &str,
    ) -> ClientResult<Vec<Map<String, Value>>> {
        self.get(&format!("{path}/{identifier}")).await
    }

    async fn submit(&self, path: &str, body: &Map<String, Value>) -> ClientResult<SubmitAck> {
        self.post(path, body).await
    }
}
