//! The circuit state snapshot.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::InvariantViolation;
use crate::gate::{Gate, GateId};

/// Qubit lines in a fresh circuit.
pub const DEFAULT_QUBITS: usize = 3;

/// Moment columns in a fresh circuit.
pub const DEFAULT_MOMENTS: usize = 10;

/// Dimensions of a fresh circuit, used at creation and on reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitDefaults {
    /// Number of qubit lines (at least one is always created).
    pub qubits: usize,
    /// Number of moment columns.
    pub moments: usize,
}

impl Default for CircuitDefaults {
    fn default() -> Self {
        Self {
            qubits: DEFAULT_QUBITS,
            moments: DEFAULT_MOMENTS,
        }
    }
}

/// Display name given to a qubit line created at `index`.
pub fn default_qubit_name(index: usize) -> String {
    index.to_string()
}

/// Qubit lines, moment columns and the gates placed on them.
///
/// Read-only outside this crate; [`CircuitEditor`](crate::CircuitEditor)
/// is the only writer. Gate order carries no meaning: two states are equal
/// when they hold the same gates, whatever order they were stored in.
#[derive(Debug, Clone)]
pub struct CircuitState {
    pub(crate) qubit_names: Vec<String>,
    pub(crate) moment_count: usize,
    pub(crate) gates: Vec<Gate>,
}

impl CircuitState {
    /// An empty circuit with default-named qubit lines.
    pub fn new(defaults: CircuitDefaults) -> Self {
        Self {
            qubit_names: (0..defaults.qubits.max(1)).map(default_qubit_name).collect(),
            moment_count: defaults.moments,
            gates: Vec::new(),
        }
    }

    /// Assemble a state from stored parts, checking every invariant.
    pub fn from_parts(
        qubit_count: usize,
        qubit_names: Vec<String>,
        moment_count: usize,
        gates: Vec<Gate>,
    ) -> Result<Self, InvariantViolation> {
        if qubit_names.len() != qubit_count {
            return Err(InvariantViolation::NameCountMismatch {
                qubit_count,
                names: qubit_names.len(),
            });
        }
        let state = Self {
            qubit_names,
            moment_count,
            gates,
        };
        state.validate()?;
        Ok(state)
    }

    /// Number of qubit lines.
    pub fn qubit_count(&self) -> usize {
        self.qubit_names.len()
    }

    /// Display names, one per line.
    pub fn qubit_names(&self) -> &[String] {
        &self.qubit_names
    }

    /// Display name of line `index`.
    pub fn qubit_name(&self, index: usize) -> Option<&str> {
        self.qubit_names.get(index).map(String::as_str)
    }

    /// Number of moment columns.
    pub fn moment_count(&self) -> usize {
        self.moment_count
    }

    /// All gates, in storage order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn num_gates(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit holds no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Gates sorted by moment, then qubit.
    pub fn gates_in_order(&self) -> Vec<&Gate> {
        let mut gates: Vec<&Gate> = self.gates.iter().collect();
        gates.sort_by_key(|g| (g.moment, g.qubit));
        gates
    }

    /// Highest moment that holds a gate.
    pub fn last_used_moment(&self) -> Option<usize> {
        self.gates.iter().map(|g| g.moment).max()
    }

    /// Check invariants 1–6 plus per-type field rules.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let qubit_count = self.qubit_count();
        if qubit_count == 0 {
            return Err(InvariantViolation::NoQubits);
        }

        let mut ids: FxHashSet<GateId> = FxHashSet::default();
        let mut slots: FxHashMap<(usize, usize), GateId> = FxHashMap::default();

        for gate in &self.gates {
            if !ids.insert(gate.id) {
                return Err(InvariantViolation::DuplicateId(gate.id));
            }
            if let Some(qubit) = gate.qubit_refs().find(|&q| q >= qubit_count) {
                return Err(InvariantViolation::QubitOutOfRange {
                    gate: gate.id,
                    qubit,
                    qubit_count,
                });
            }
            if gate.moment >= self.moment_count {
                return Err(InvariantViolation::MomentOutOfRange {
                    gate: gate.id,
                    moment: gate.moment,
                    moment_count: self.moment_count,
                });
            }
            if gate.target.is_some() && !gate.kind.has_target() {
                return Err(InvariantViolation::UnexpectedField {
                    gate: gate.id,
                    kind: gate.kind,
                    field: "target",
                });
            }
            if gate.parameter.is_some() && !gate.kind.is_rotation() {
                return Err(InvariantViolation::UnexpectedField {
                    gate: gate.id,
                    kind: gate.kind,
                    field: "parameter",
                });
            }
            if gate.kind.has_target() && gate.target.is_none() {
                return Err(InvariantViolation::MissingTarget { gate: gate.id });
            }
            if gate.target == Some(gate.qubit) {
                return Err(InvariantViolation::SelfTarget {
                    gate: gate.id,
                    qubit: gate.qubit,
                });
            }
            let controls = gate.controls.as_deref().unwrap_or_default();
            for (i, &qubit) in controls.iter().enumerate() {
                if controls[..i].contains(&qubit) {
                    return Err(InvariantViolation::DuplicateControl {
                        gate: gate.id,
                        qubit,
                    });
                }
            }
            if let Some(&qubit) = gate
                .controls
                .iter()
                .flatten()
                .find(|&&c| c == gate.qubit || Some(c) == gate.target)
            {
                return Err(InvariantViolation::ControlOverlap {
                    gate: gate.id,
                    qubit,
                });
            }
            if let Some(first) = slots.insert(gate.slot(), gate.id) {
                return Err(InvariantViolation::SlotCollision {
                    first,
                    second: gate.id,
                    qubit: gate.qubit,
                    moment: gate.moment,
                });
            }
        }

        Ok(())
    }
}

impl Default for CircuitState {
    fn default() -> Self {
        Self::new(CircuitDefaults::default())
    }
}

impl PartialEq for CircuitState {
    fn eq(&self, other: &Self) -> bool {
        if self.qubit_names != other.qubit_names
            || self.moment_count != other.moment_count
            || self.gates.len() != other.gates.len()
        {
            return false;
        }
        let mut ours: Vec<&Gate> = self.gates.iter().collect();
        let mut theirs: Vec<&Gate> = other.gates.iter().collect();
        ours.sort_by_key(|g| g.id);
        theirs.sort_by_key(|g| g.id);
        ours == theirs
    }
}
