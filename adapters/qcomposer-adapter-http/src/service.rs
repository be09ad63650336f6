//! [`CircuitService`] over HTTP.

use async_trait::async_trait;
use qcomposer_session::{CircuitService, ServiceResult};
use qcomposer_wire::{CircuitRequest, CodeResult, SimulationResult};
use tracing::{debug, instrument};

use crate::api::ComposerClient;
use crate::config::ServiceConfig;
use crate::error::HttpServiceResult;

/// The composer service reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCircuitService {
    client: ComposerClient,
}

impl HttpCircuitService {
    /// Connect to the service described by `config`.
    pub fn new(config: &ServiceConfig) -> HttpServiceResult<Self> {
        let client = ComposerClient::new(config)?;
        debug!(base_url = client.base_url(), "Created HTTP circuit service");
        Ok(Self { client })
    }

    /// Connect using [`ServiceConfig::from_env`].
    pub fn from_env() -> HttpServiceResult<Self> {
        Self::new(&ServiceConfig::from_env()?)
    }

    /// The underlying REST client.
    pub fn client(&self) -> &ComposerClient {
        &self.client
    }
}

#[async_trait]
impl CircuitService for HttpCircuitService {
    fn name(&self) -> &str {
        "http"
    }

    async fn simulate(&self, request: &CircuitRequest) -> ServiceResult<SimulationResult> {
        Ok(self.client.simulate(request).await?)
    }

    async fn generate_code(&self, request: &CircuitRequest) -> ServiceResult<CodeResult> {
        Ok(self.client.generate_code(request).await?)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> ServiceResult<()> {
        let banner = self.client.health().await?;
        debug!(message = %banner.message, "Service is up");
        Ok(())
    }
}
