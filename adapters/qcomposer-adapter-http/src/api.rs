//! Composer service REST client.
//!
//! | Method | Path | Body | Answer |
//! |--------|------|------|--------|
//! | GET | `/` | | `{"message": ...}` |
//! | POST | `/simulate` | `CircuitRequest` | `SimulationResult` |
//! | POST | `/code` | `CircuitRequest` | `CodeResult` |

use qcomposer_wire::{CircuitRequest, CodeResult, SimulationResult};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::ServiceConfig;
use crate::error::{HttpServiceError, HttpServiceResult};

/// Answer of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service banner.
    pub message: String,
}

/// REST client for the composer service.
#[derive(Debug, Clone)]
pub struct ComposerClient {
    /// HTTP client with timeouts configured.
    client: Client,
    /// Service root (without trailing slash).
    base_url: String,
}

impl ComposerClient {
    /// Build a client from `config`.
    pub fn new(config: &ServiceConfig) -> HttpServiceResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| HttpServiceError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(HttpServiceError::Http)?;

        Ok(Self { client, base_url })
    }

    /// Service root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Perform a GET request, returning the deserialized JSON body.
    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> HttpServiceResult<T> {
        let url = self.url(path);
        debug!("GET {}", url);

        let resp = self.client.get(&url).send().await?;
        self.handle_response(resp).await
    }

    /// Perform a POST request with a JSON body, returning the deserialized JSON body.
    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> HttpServiceResult<T> {
        let url = self.url(path);
        debug!("POST {}", url);

        let resp = self.client.post(&url).json(body).send().await?;
        self.handle_response(resp).await
    }

    /// Deserialize a 2xx body or turn anything else into an error.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> HttpServiceResult<T> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(HttpServiceError::ApiError {
                status: status.as_u16(),
                message,
            })
        }
    }

    // -----------------------------------------------------------------------
    // Public API methods
    // -----------------------------------------------------------------------

    /// Fetch the service banner.
    #[instrument(skip(self))]
    pub async fn health(&self) -> HttpServiceResult<HealthResponse> {
        self.get("/").await
    }

    /// Simulate a circuit.
    #[instrument(skip(self, request), fields(qubits = request.qubit_count, gates = request.gates.len()))]
    pub async fn simulate(&self, request: &CircuitRequest) -> HttpServiceResult<SimulationResult> {
        self.post("simulate", request).await
    }

    /// Render a circuit as diagram and source code.
    #[instrument(skip(self, request), fields(qubits = request.qubit_count, gates = request.gates.len()))]
    pub async fn generate_code(&self, request: &CircuitRequest) -> HttpServiceResult<CodeResult> {
        self.post("code", request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_trimmed() {
        let client =
            ComposerClient::new(&ServiceConfig::with_base_url("http://localhost:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/simulate"), "http://localhost:8000/simulate");
        assert_eq!(client.url("code"), "http://localhost:8000/code");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ComposerClient::new(&ServiceConfig::with_base_url("not a url")).unwrap_err();
        assert!(matches!(err, HttpServiceError::InvalidUrl { .. }));
    }

    #[test]
    fn test_health_response_shape() {
        let health: HealthResponse =
            serde_json::from_str(r#"{"message": "Quantum Composer Backend"}"#).unwrap();
        assert_eq!(health.message, "Quantum Composer Backend");
    }
}
