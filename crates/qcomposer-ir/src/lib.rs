//! QComposer circuit model
//!
//! This crate holds the editable representation of a quantum circuit: a
//! grid of qubit lines × moment columns with gates placed on it, and the
//! editing engine that keeps that grid consistent.
//!
//! # Core Components
//!
//! - **Gates**: [`Gate`], [`GateKind`] (the closed set H, X, Y, Z, RX, RY, RZ,
//!   CNOT) and [`GateId`] for stable identity
//! - **State**: [`CircuitState`], the read-only snapshot of qubit names,
//!   moment count and gates
//! - **Editor**: [`CircuitEditor`], the only writer of a state; every
//!   operation is atomic
//! - **Renumbering**: [`QubitShift`], the single transform applied to every
//!   qubit reference when a line is inserted or removed
//! - **Angles**: [`parse_angle`] / [`format_angle`] for rotation input
//!
//! # Example
//!
//! ```rust
//! use qcomposer_ir::{CircuitEditor, GateChanges, GateKind, InsertPosition};
//!
//! let mut editor = CircuitEditor::default(); // 3 qubits, 10 moments
//!
//! let cx = editor.place_gate(0, 0, GateKind::Cnot).unwrap();
//! assert_eq!(editor.gate(cx).unwrap().target, Some(1));
//!
//! // Retarget, then insert a line above the target
//! editor.update_gate(cx, &GateChanges::new().with_target(2)).unwrap();
//! editor.add_qubit(2, InsertPosition::Before).unwrap();
//! assert_eq!(editor.gate(cx).unwrap().target, Some(3));
//!
//! // Removing the target line drops the whole gate
//! editor.remove_qubit(3).unwrap();
//! assert!(editor.gate(cx).is_none());
//! ```

pub mod angle;
pub mod editor;
pub mod error;
pub mod gate;
pub mod remap;
pub mod state;

pub use angle::{format_angle, parse_angle};
pub use editor::{CircuitEditor, InsertPosition};
pub use error::{EditError, EditResult, InvariantViolation};
pub use gate::{DEFAULT_ROTATION, Gate, GateChanges, GateId, GateKind, default_target};
pub use remap::{QubitShift, shift_gates};
pub use state::{
    CircuitDefaults, CircuitState, DEFAULT_MOMENTS, DEFAULT_QUBITS, default_qubit_name,
};
