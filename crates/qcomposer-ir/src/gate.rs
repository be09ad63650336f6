//! Gate records.

use std::f64::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::angle::format_angle;
use crate::error::{EditError, EditResult};

/// Rotation angle given to freshly placed RX/RY/RZ gates, in radians.
pub const DEFAULT_ROTATION: f64 = FRAC_PI_2;

/// The closed set of gate types the composer offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GateKind {
    /// Hadamard gate.
    H,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Rotation around X.
    #[serde(rename = "RX")]
    Rx,
    /// Rotation around Y.
    #[serde(rename = "RY")]
    Ry,
    /// Rotation around Z.
    #[serde(rename = "RZ")]
    Rz,
    /// Controlled-NOT; the owning qubit is the control.
    #[serde(rename = "CNOT")]
    Cnot,
}

impl GateKind {
    /// Every gate type, in palette order.
    pub const ALL: [GateKind; 8] = [
        GateKind::H,
        GateKind::X,
        GateKind::Y,
        GateKind::Z,
        GateKind::Rx,
        GateKind::Ry,
        GateKind::Rz,
        GateKind::Cnot,
    ];

    /// Wire name of the gate type.
    pub fn name(self) -> &'static str {
        match self {
            GateKind::H => "H",
            GateKind::X => "X",
            GateKind::Y => "Y",
            GateKind::Z => "Z",
            GateKind::Rx => "RX",
            GateKind::Ry => "RY",
            GateKind::Rz => "RZ",
            GateKind::Cnot => "CNOT",
        }
    }

    /// Whether the gate carries a rotation angle.
    pub fn is_rotation(self) -> bool {
        matches!(self, GateKind::Rx | GateKind::Ry | GateKind::Rz)
    }

    /// Whether the gate carries a target qubit.
    pub fn has_target(self) -> bool {
        self == GateKind::Cnot
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GateKind {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "H" => Ok(GateKind::H),
            "X" => Ok(GateKind::X),
            "Y" => Ok(GateKind::Y),
            "Z" => Ok(GateKind::Z),
            "RX" => Ok(GateKind::Rx),
            "RY" => Ok(GateKind::Ry),
            "RZ" => Ok(GateKind::Rz),
            "CNOT" | "CX" => Ok(GateKind::Cnot),
            _ => Err(EditError::UnknownGate(s.to_string())),
        }
    }
}

/// Stable identity of a gate.
///
/// Assigned once at creation and never reassigned; moving or re-targeting
/// a gate keeps its id, replacing it issues a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GateId(pub Uuid);

impl GateId {
    /// Allocate a new, never-before-seen id.
    pub fn fresh() -> Self {
        GateId(Uuid::new_v4())
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Default CNOT target for a gate owned by `qubit`: the next line down,
/// wrapping to the top.
pub fn default_target(qubit: usize, qubit_count: usize) -> usize {
    (qubit + 1) % qubit_count.max(1)
}

/// A gate placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// Stable identity.
    pub id: GateId,
    /// Gate type.
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// Owning qubit line (the control for CNOT).
    pub qubit: usize,
    /// Column index.
    pub moment: usize,
    /// CNOT target line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    /// Rotation angle in radians (RX/RY/RZ).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<f64>,
    /// Extra control lines, disjoint from `qubit` and `target`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<usize>>,
}

impl Gate {
    /// Create a gate with the type's defaults: CNOT targets the next line,
    /// rotations start at π/2.
    pub fn new(kind: GateKind, qubit: usize, moment: usize, qubit_count: usize) -> EditResult<Self> {
        let mut gate = Self {
            id: GateId::fresh(),
            kind,
            qubit,
            moment,
            target: None,
            parameter: None,
            controls: None,
        };

        if kind.has_target() {
            let target = default_target(qubit, qubit_count);
            if target == qubit {
                return Err(EditError::NoTargetAvailable);
            }
            gate.target = Some(target);
        }
        if kind.is_rotation() {
            gate.parameter = Some(DEFAULT_ROTATION);
        }

        Ok(gate)
    }

    /// The `(qubit, moment)` slot this gate occupies.
    pub fn slot(&self) -> (usize, usize) {
        (self.qubit, self.moment)
    }

    /// Every qubit index the gate refers to: owner, target, then controls.
    pub fn qubit_refs(&self) -> impl Iterator<Item = usize> + '_ {
        std::iter::once(self.qubit)
            .chain(self.target)
            .chain(self.controls.iter().flatten().copied())
    }

    /// Whether any reference field points at `qubit`.
    pub fn references(&self, qubit: usize) -> bool {
        self.qubit_refs().any(|q| q == qubit)
    }

    /// Short display label, e.g. `H` or `RX(pi/2)`.
    pub fn label(&self) -> String {
        match self.parameter {
            Some(theta) if self.kind.is_rotation() => {
                format!("{}({})", self.kind, format_angle(theta))
            }
            _ => self.kind.to_string(),
        }
    }
}

/// A partial update to an existing gate. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GateChanges {
    /// Move the gate to another qubit line.
    pub qubit: Option<usize>,
    /// Move the gate to another moment.
    pub moment: Option<usize>,
    /// New CNOT target.
    pub target: Option<usize>,
    /// New rotation angle in radians.
    pub parameter: Option<f64>,
    /// Replacement control list; empty clears it.
    pub controls: Option<Vec<usize>>,
}

impl GateChanges {
    /// An empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `qubit`.
    pub fn with_qubit(mut self, qubit: usize) -> Self {
        self.qubit = Some(qubit);
        self
    }

    /// Move to `moment`.
    pub fn with_moment(mut self, moment: usize) -> Self {
        self.moment = Some(moment);
        self
    }

    /// Retarget a CNOT.
    pub fn with_target(mut self, target: usize) -> Self {
        self.target = Some(target);
        self
    }

    /// Set a rotation angle.
    pub fn with_parameter(mut self, parameter: f64) -> Self {
        self.parameter = Some(parameter);
        self
    }

    /// Replace the control list.
    pub fn with_controls(mut self, controls: Vec<usize>) -> Self {
        self.controls = Some(controls);
        self
    }

    /// Whether the change set carries no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
