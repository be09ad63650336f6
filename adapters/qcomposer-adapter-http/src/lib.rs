//! QComposer adapter for the HTTP composer service
//!
//! Implements [`CircuitService`](qcomposer_session::CircuitService) against
//! the REST service that simulates circuits and renders them as code, and
//! provides [`UrlLocation`], a share-link store backed by a real page URL.
//!
//! # Configuration
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `QCOMPOSER_SERVICE_URL` | `http://127.0.0.1:8000` | Service root |
//! | `QCOMPOSER_TIMEOUT_SECS` | `30` | Whole-request timeout |
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use qcomposer_adapter_http::{HttpCircuitService, UrlLocation};
//! use qcomposer_ir::GateKind;
//! use qcomposer_session::{Session, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = Arc::new(HttpCircuitService::from_env()?);
//!     let location = UrlLocation::parse("http://localhost:5173/")?;
//!     let mut session = Session::load(service, location, SessionConfig::from_env()?);
//!
//!     session.place_gate(0, 0, GateKind::H)?;
//!     while session.next_response().await.is_some() {}
//!
//!     println!("{}", session.location().as_str());
//!     println!("{}", session.code().map(|c| c.source_code.as_str()).unwrap_or(""));
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod error;
mod location;
mod service;

pub use api::{ComposerClient, HealthResponse};
pub use config::{DEFAULT_BASE_URL, ServiceConfig};
pub use error::{HttpServiceError, HttpServiceResult};
pub use location::UrlLocation;
pub use service::HttpCircuitService;
