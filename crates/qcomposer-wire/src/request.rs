//! Request document sent to the simulation and code-generation service.
//!
//! This is where per-type defaults become explicit: the service never has
//! to guess a CNOT target or a rotation angle.

use serde::{Deserialize, Serialize};

use qcomposer_ir::{CircuitState, DEFAULT_ROTATION, Gate, GateKind, default_target};

/// Body of a `/simulate` or `/code` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitRequest {
    /// Number of qubit lines.
    #[serde(rename = "qubits")]
    pub qubit_count: usize,
    /// Display names, one per line.
    pub qubit_names: Vec<String>,
    /// Gates ordered by moment, then qubit.
    pub gates: Vec<GateRecord>,
}

/// One normalized gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Gate type (`"H"`, `"RX"`, `"CNOT"`, ...).
    #[serde(rename = "type")]
    pub kind: GateKind,
    /// Owning qubit line.
    pub qubit: usize,
    /// Column index.
    pub moment: usize,
    /// CNOT control line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<usize>,
    /// CNOT target line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,
    /// Rotation angle in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<f64>,
    /// Extra control lines, passed through unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controls: Option<Vec<usize>>,
}

impl GateRecord {
    /// Normalize `gate` for a circuit with `qubit_count` lines.
    pub fn from_gate(gate: &Gate, qubit_count: usize) -> Self {
        let mut record = Self {
            kind: gate.kind,
            qubit: gate.qubit,
            moment: gate.moment,
            control: None,
            target: None,
            parameter: None,
            controls: None,
        };

        match gate.kind {
            GateKind::Cnot => {
                record.control = Some(gate.qubit);
                record.target = Some(
                    gate.target
                        .unwrap_or_else(|| default_target(gate.qubit, qubit_count)),
                );
                record.controls.clone_from(&gate.controls);
            }
            GateKind::Rx | GateKind::Ry | GateKind::Rz => {
                record.parameter = Some(gate.parameter.unwrap_or(DEFAULT_ROTATION));
            }
            GateKind::H | GateKind::X | GateKind::Y | GateKind::Z => {}
        }

        record
    }
}

impl CircuitRequest {
    /// Derive the request for `state`.
    pub fn from_state(state: &CircuitState) -> Self {
        let qubit_count = state.qubit_count();
        Self {
            qubit_count,
            qubit_names: state.qubit_names().to_vec(),
            gates: state
                .gates_in_order()
                .into_iter()
                .map(|gate| GateRecord::from_gate(gate, qubit_count))
                .collect(),
        }
    }
}

/// Derive the request document for `state`. Pure; computes no amplitudes.
pub fn derive_request(state: &CircuitState) -> CircuitRequest {
    CircuitRequest::from_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcomposer_ir::{CircuitEditor, GateChanges, GateId};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_cnot_without_explicit_target() {
        let mut editor = CircuitEditor::default();
        editor.place_gate(0, 0, GateKind::Cnot).unwrap();
        let req = derive_request(editor.state());
        assert_eq!(req.gates[0].control, Some(0));
        assert_eq!(req.gates[0].target, Some(1));
    }

    #[test]
    fn test_cnot_missing_target_defaults_next_line() {
        let gate = Gate {
            id: GateId::fresh(),
            kind: GateKind::Cnot,
            qubit: 2,
            moment: 0,
            target: None,
            parameter: None,
            controls: Some(vec![1]),
        };
        let record = GateRecord::from_gate(&gate, 3);
        assert_eq!(record.control, Some(2));
        assert_eq!(record.target, Some(0));
        assert_eq!(record.controls, Some(vec![1]));
    }

    #[test]
    fn test_rotation_parameter_passthrough_and_default() {
        let mut editor = CircuitEditor::default();
        let rx = editor.place_gate(0, 0, GateKind::Rx).unwrap();
        editor.place_gate(1, 0, GateKind::Ry).unwrap();
        editor
            .update_gate(rx, &GateChanges::new().with_parameter(0.125))
            .unwrap();
        let req = derive_request(editor.state());
        assert_eq!(req.gates[0].parameter, Some(0.125));
        assert_eq!(req.gates[1].parameter, Some(FRAC_PI_2));

        let bare = Gate {
            id: GateId::fresh(),
            kind: GateKind::Rz,
            qubit: 0,
            moment: 0,
            target: None,
            parameter: None,
            controls: None,
        };
        assert_eq!(GateRecord::from_gate(&bare, 1).parameter, Some(FRAC_PI_2));
    }

    #[test]
    fn test_plain_gate_has_no_extras() {
        let mut editor = CircuitEditor::default();
        editor.place_gate(2, 4, GateKind::Z).unwrap();
        let json = serde_json::to_value(derive_request(editor.state())).unwrap();
        let gate = &json["gates"][0];
        assert_eq!(gate["type"], "Z");
        assert_eq!(gate["qubit"], 2);
        assert_eq!(gate["moment"], 4);
        assert!(gate.get("control").is_none());
        assert!(gate.get("target").is_none());
        assert!(gate.get("parameter").is_none());
    }

    #[test]
    fn test_request_json_shape() {
        let mut editor = CircuitEditor::default();
        editor.rename_qubit(0, "alice").unwrap();
        let json = serde_json::to_value(derive_request(editor.state())).unwrap();
        assert_eq!(json["qubits"], 3);
        assert_eq!(json["qubitNames"][0], "alice");
        assert!(json["gates"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_gates_sorted_by_moment_then_qubit() {
        let mut editor = CircuitEditor::default();
        editor.place_gate(1, 3, GateKind::H).unwrap();
        editor.place_gate(2, 0, GateKind::X).unwrap();
        editor.place_gate(0, 3, GateKind::Y).unwrap();
        let req = derive_request(editor.state());
        let order: Vec<_> = req.gates.iter().map(|g| (g.moment, g.qubit)).collect();
        assert_eq!(order, vec![(0, 2), (3, 0), (3, 1)]);
    }
}
