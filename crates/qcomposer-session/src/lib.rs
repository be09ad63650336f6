//! QComposer editing session
//!
//! Glues the circuit editor to the outside world:
//!
//! - [`Session`]: applies edits, keeps the share link current, and requests
//!   simulation and code for every committed revision
//! - [`CircuitService`]: the async collaborator that answers those requests
//! - [`Location`]: where the share token is read from and written to
//! - [`ConnectGesture`]: drag-to-connect for CNOT targets
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use qcomposer_ir::GateKind;
//! use qcomposer_session::{
//!     CircuitService, Location, MemoryLocation, ServiceResult, Session, SessionConfig,
//! };
//! use qcomposer_wire::{CircuitRequest, CodeResult, SimulationResult};
//!
//! struct Offline;
//!
//! #[async_trait]
//! impl CircuitService for Offline {
//!     fn name(&self) -> &str {
//!         "offline"
//!     }
//!     async fn simulate(&self, _: &CircuitRequest) -> ServiceResult<SimulationResult> {
//!         Ok(SimulationResult::default())
//!     }
//!     async fn generate_code(&self, _: &CircuitRequest) -> ServiceResult<CodeResult> {
//!         Ok(CodeResult::default())
//!     }
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let mut session = Session::load(Arc::new(Offline), MemoryLocation::new(), SessionConfig::default());
//! session.place_gate(0, 0, GateKind::H).unwrap();
//! assert!(session.location().query_param("circuit").is_some());
//!
//! while session.next_response().await.is_some() {}
//! assert!(session.simulation().is_some());
//! # });
//! ```

pub mod config;
pub mod error;
pub mod gesture;
pub mod location;
pub mod service;
pub mod session;

pub use config::{DEFAULT_MOMENT_INCREMENT, DEFAULT_SHARE_PARAM, SessionConfig};
pub use error::{ConfigError, ServiceError, ServiceResult};
pub use gesture::{ConnectGesture, LineLayout, Point};
pub use location::{Location, MemoryLocation};
pub use service::{Channel, CircuitService};
pub use session::{ReplyOutcome, Session};
