//! QComposer wire formats
//!
//! Everything that leaves or enters the editor as bytes:
//!
//! - [`CircuitRequest`]: the normalized circuit sent to the simulation and
//!   code-generation service ([`derive_request`])
//! - [`SimulationResult`] / [`CodeResult`]: what the service answers
//! - [`select_view`]: which time slice of a simulation to display
//! - [`snapshot`]: the compact, URL-safe token that persists a circuit
//!
//! # Example
//!
//! ```rust
//! use qcomposer_ir::{CircuitEditor, GateKind};
//! use qcomposer_wire::{derive_request, snapshot};
//!
//! let mut editor = CircuitEditor::default();
//! editor.place_gate(0, 0, GateKind::Cnot).unwrap();
//!
//! let request = derive_request(editor.state());
//! assert_eq!(request.gates[0].control, Some(0));
//! assert_eq!(request.gates[0].target, Some(1));
//!
//! let token = snapshot::encode(editor.state()).unwrap();
//! assert_eq!(&snapshot::decode(&token).unwrap(), editor.state());
//! ```

pub mod error;
pub mod request;
pub mod response;
pub mod select;
pub mod snapshot;

pub use error::{SnapshotError, SnapshotResult};
pub use request::{CircuitRequest, GateRecord, derive_request};
pub use response::{
    Amplitude, BlochVector, CodeResult, INITIAL_MOMENT, SimulationResult, SimulationStep,
};
pub use select::{StateView, select_view};
