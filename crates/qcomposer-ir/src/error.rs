//! Error types for the IR crate.

use thiserror::Error;

use crate::gate::{GateId, GateKind};

/// Reasons an edit is rejected.
///
/// A rejected edit never touches the circuit; the message is meant to be
/// shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum EditError {
    /// Qubit index outside `[0, qubit_count)`.
    #[error("Qubit {qubit} is out of range for a {qubit_count}-qubit circuit")]
    QubitOutOfRange {
        /// The offending index.
        qubit: usize,
        /// Current number of qubits.
        qubit_count: usize,
    },

    /// Moment index outside `[0, moment_count)`.
    #[error("Moment {moment} is out of range (circuit has {moment_count} moments)")]
    MomentOutOfRange {
        /// The offending index.
        moment: usize,
        /// Current number of moments.
        moment_count: usize,
    },

    /// No gate with this id.
    #[error("Gate {0} not found")]
    GateNotFound(GateId),

    /// CNOT target equal to its own qubit.
    #[error("CNOT target must differ from its control qubit {0}")]
    SelfTarget(usize),

    /// A CNOT cannot be placed on a single-qubit circuit.
    #[error("CNOT needs at least two qubits")]
    NoTargetAvailable,

    /// The gate type does not carry this field.
    #[error("{kind} gates do not take a {field}")]
    FieldNotApplicable {
        /// Type of the gate being edited.
        kind: GateKind,
        /// Name of the rejected field.
        field: &'static str,
    },

    /// Rotation angle is not a finite number.
    #[error("Rotation angle must be a finite number, got '{0}'")]
    InvalidParameter(String),

    /// Control index collides with the gate's qubit or target.
    #[error("Control qubit {0} overlaps the gate's qubit or target")]
    ControlOverlap(usize),

    /// Control index listed twice.
    #[error("Control qubit {0} is listed more than once")]
    DuplicateControl(usize),

    /// Another gate already sits on the destination slot.
    #[error("Qubit {qubit} already has a gate at moment {moment}")]
    SlotOccupied {
        /// Destination qubit.
        qubit: usize,
        /// Destination moment.
        moment: usize,
    },

    /// Gate type name not in the supported set.
    #[error("Unknown gate type '{0}'")]
    UnknownGate(String),
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

/// A structural invariant that a circuit state fails to satisfy.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum InvariantViolation {
    /// A circuit needs at least one qubit line.
    #[error("Circuit has no qubits")]
    NoQubits,

    /// `qubitNames` length differs from `qubitCount`.
    #[error("Expected {qubit_count} qubit names, found {names}")]
    NameCountMismatch {
        /// Declared qubit count.
        qubit_count: usize,
        /// Number of names supplied.
        names: usize,
    },

    /// A gate references a qubit that does not exist.
    #[error("Gate {gate} references qubit {qubit} outside [0, {qubit_count})")]
    QubitOutOfRange {
        /// Offending gate.
        gate: GateId,
        /// The out-of-range reference.
        qubit: usize,
        /// Current number of qubits.
        qubit_count: usize,
    },

    /// A gate sits beyond the last moment.
    #[error("Gate {gate} sits at moment {moment} outside [0, {moment_count})")]
    MomentOutOfRange {
        /// Offending gate.
        gate: GateId,
        /// The out-of-range moment.
        moment: usize,
        /// Current number of moments.
        moment_count: usize,
    },

    /// A CNOT targets its own qubit.
    #[error("CNOT gate {gate} targets its own qubit {qubit}")]
    SelfTarget {
        /// Offending gate.
        gate: GateId,
        /// The shared index.
        qubit: usize,
    },

    /// A control entry equals the gate's qubit or target.
    #[error("Gate {gate} lists qubit {qubit} both as a control and as its qubit or target")]
    ControlOverlap {
        /// Offending gate.
        gate: GateId,
        /// The overlapping index.
        qubit: usize,
    },

    /// Two gates share one `(qubit, moment)` slot.
    #[error("Gates {first} and {second} both occupy qubit {qubit} at moment {moment}")]
    SlotCollision {
        /// Gate seen first.
        first: GateId,
        /// Gate seen second.
        second: GateId,
        /// Shared qubit.
        qubit: usize,
        /// Shared moment.
        moment: usize,
    },

    /// Two gates carry the same id.
    #[error("Gate id {0} appears more than once")]
    DuplicateId(GateId),

    /// A field that the gate type does not take.
    #[error("{kind} gate {gate} carries a {field}")]
    UnexpectedField {
        /// Offending gate.
        gate: GateId,
        /// Its type.
        kind: GateKind,
        /// Name of the stray field.
        field: &'static str,
    },

    /// A CNOT without a target line.
    #[error("CNOT gate {gate} has no target")]
    MissingTarget {
        /// Offending gate.
        gate: GateId,
    },

    /// A control entry listed twice.
    #[error("Gate {gate} lists control qubit {qubit} more than once")]
    DuplicateControl {
        /// Offending gate.
        gate: GateId,
        /// The repeated index.
        qubit: usize,
    },
}
