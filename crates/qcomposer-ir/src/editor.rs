//! Structural edits on a circuit.
//!
//! [`CircuitEditor`] owns the [`CircuitState`] and is the only code that
//! writes it. Every operation is atomic: it either applies completely or
//! returns an [`EditError`] and leaves the state exactly as it was.
//!
//! Two indices are kept beside the state so that slot occupancy and gate
//! lookup by id are O(1):
//!
//! - `by_slot`: `(qubit, moment)` → gate id
//! - `by_id`: gate id → position in the gate vector
//!
//! Single-gate edits patch both indices in place; bulk renumbering on qubit
//! insertion/removal rebuilds them after the one-pass transform.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EditError, EditResult};
use crate::gate::{Gate, GateChanges, GateId, GateKind};
use crate::remap::{QubitShift, shift_gates};
use crate::state::{CircuitDefaults, CircuitState, default_qubit_name};

type Slot = (usize, usize);

/// Where a new qubit line goes relative to its anchor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    /// Above the anchor: the new line takes the anchor's index.
    Before,
    /// Below the anchor.
    After,
}

impl InsertPosition {
    /// Index the new line will occupy.
    pub fn insert_index(self, anchor: usize) -> usize {
        match self {
            InsertPosition::Before => anchor,
            InsertPosition::After => anchor + 1,
        }
    }
}

/// Editing engine for a single circuit.
#[derive(Debug, Clone)]
pub struct CircuitEditor {
    state: CircuitState,
    defaults: CircuitDefaults,
    by_slot: FxHashMap<Slot, GateId>,
    by_id: FxHashMap<GateId, usize>,
}

impl CircuitEditor {
    /// Start from an empty circuit of the given dimensions.
    pub fn new(defaults: CircuitDefaults) -> Self {
        Self::from_state(CircuitState::new(defaults), defaults)
    }

    /// Resume editing an existing state (for instance a decoded snapshot).
    ///
    /// `defaults` is what [`reset`](Self::reset) returns to.
    pub fn from_state(state: CircuitState, defaults: CircuitDefaults) -> Self {
        let mut editor = Self {
            state,
            defaults,
            by_slot: FxHashMap::default(),
            by_id: FxHashMap::default(),
        };
        editor.reindex();
        editor
    }

    /// The current committed state.
    pub fn state(&self) -> &CircuitState {
        &self.state
    }

    /// Dimensions used by [`reset`](Self::reset).
    pub fn defaults(&self) -> CircuitDefaults {
        self.defaults
    }

    /// Look up a gate by id.
    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.by_id.get(&id).map(|&pos| &self.state.gates[pos])
    }

    /// The gate occupying `(qubit, moment)`, if any.
    pub fn gate_at(&self, qubit: usize, moment: usize) -> Option<&Gate> {
        self.by_slot
            .get(&(qubit, moment))
            .and_then(|&id| self.gate(id))
    }

    // =========================================================================
    // Gate edits
    // =========================================================================

    /// Put a new `kind` gate on `(qubit, moment)`, replacing whatever was there.
    ///
    /// The new gate always gets a fresh id.
    pub fn place_gate(&mut self, qubit: usize, moment: usize, kind: GateKind) -> EditResult<GateId> {
        self.check_qubit(qubit)?;
        self.check_moment(moment)?;
        let gate = Gate::new(kind, qubit, moment, self.state.qubit_count())?;

        if let Some(existing) = self.by_slot.get(&(qubit, moment)).copied() {
            debug!(%existing, qubit, moment, "replacing gate");
            self.take(existing);
        }

        let id = gate.id;
        self.insert(gate);
        Ok(id)
    }

    /// Apply `changes` to gate `id` after validating them against the
    /// gate's type and the current circuit dimensions.
    pub fn update_gate(&mut self, id: GateId, changes: &GateChanges) -> EditResult<()> {
        let current = self.gate(id).cloned().ok_or(EditError::GateNotFound(id))?;
        let mut next = current.clone();

        if let Some(qubit) = changes.qubit {
            self.check_qubit(qubit)?;
            next.qubit = qubit;
        }
        if let Some(moment) = changes.moment {
            self.check_moment(moment)?;
            next.moment = moment;
        }
        if let Some(target) = changes.target {
            if !next.kind.has_target() {
                return Err(EditError::FieldNotApplicable {
                    kind: next.kind,
                    field: "target",
                });
            }
            self.check_qubit(target)?;
            next.target = Some(target);
        }
        if let Some(parameter) = changes.parameter {
            if !next.kind.is_rotation() {
                return Err(EditError::FieldNotApplicable {
                    kind: next.kind,
                    field: "parameter",
                });
            }
            if !parameter.is_finite() {
                return Err(EditError::InvalidParameter(parameter.to_string()));
            }
            next.parameter = Some(parameter);
        }
        if let Some(controls) = &changes.controls {
            let mut seen = Vec::with_capacity(controls.len());
            for &control in controls {
                self.check_qubit(control)?;
                if seen.contains(&control) {
                    return Err(EditError::DuplicateControl(control));
                }
                seen.push(control);
            }
            next.controls = (!seen.is_empty()).then_some(seen);
        }

        if next.target == Some(next.qubit) {
            return Err(EditError::SelfTarget(next.qubit));
        }
        if let Some(&control) = next
            .controls
            .iter()
            .flatten()
            .find(|&&c| c == next.qubit || Some(c) == next.target)
        {
            return Err(EditError::ControlOverlap(control));
        }
        if next.slot() != current.slot() {
            if self.by_slot.contains_key(&next.slot()) {
                return Err(EditError::SlotOccupied {
                    qubit: next.qubit,
                    moment: next.moment,
                });
            }
            self.by_slot.remove(&current.slot());
            self.by_slot.insert(next.slot(), id);
        }

        let pos = self.by_id[&id];
        self.state.gates[pos] = next;
        Ok(())
    }

    /// Delete gate `id`. Other gates and all indices are untouched.
    pub fn remove_gate(&mut self, id: GateId) -> EditResult<Gate> {
        self.take(id).ok_or(EditError::GateNotFound(id))
    }

    // =========================================================================
    // Qubit edits
    // =========================================================================

    /// Insert a default-named qubit line next to `anchor`.
    ///
    /// Every reference at or past the insertion index moves down by one.
    /// Returns the index of the new line.
    pub fn add_qubit(&mut self, anchor: usize, position: InsertPosition) -> EditResult<usize> {
        self.check_qubit(anchor)?;
        let at = position.insert_index(anchor);

        self.state.gates = shift_gates(&self.state.gates, QubitShift::Insert(at));
        self.state
            .qubit_names
            .insert(at, default_qubit_name(at));
        self.reindex();
        Ok(at)
    }

    /// Remove qubit line `index` along with every gate that references it.
    ///
    /// Returns the number of gates dropped, or `None` when the circuit has a
    /// single line left, in which case nothing changes.
    pub fn remove_qubit(&mut self, index: usize) -> EditResult<Option<usize>> {
        if self.state.qubit_count() <= 1 {
            return Ok(None);
        }
        self.check_qubit(index)?;

        let before = self.state.gates.len();
        self.state.gates = shift_gates(&self.state.gates, QubitShift::Remove(index));
        self.state.qubit_names.remove(index);
        self.reindex();

        let dropped = before - self.state.gates.len();
        debug!(index, dropped, "removed qubit");
        Ok(Some(dropped))
    }

    /// Change the display name of line `index`. Names need not be unique.
    pub fn rename_qubit(&mut self, index: usize, name: impl Into<String>) -> EditResult<()> {
        self.check_qubit(index)?;
        self.state.qubit_names[index] = name.into();
        Ok(())
    }

    // =========================================================================
    // Whole-circuit edits
    // =========================================================================

    /// Append `increment` moment columns. Returns the new moment count.
    pub fn extend_moments(&mut self, increment: usize) -> usize {
        self.state.moment_count = self.state.moment_count.saturating_add(increment);
        self.state.moment_count
    }

    /// Return to an empty circuit with the default dimensions.
    pub fn reset(&mut self) {
        self.state = CircuitState::new(self.defaults);
        self.by_slot.clear();
        self.by_id.clear();
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_qubit(&self, qubit: usize) -> EditResult<()> {
        let qubit_count = self.state.qubit_count();
        if qubit < qubit_count {
            Ok(())
        } else {
            Err(EditError::QubitOutOfRange { qubit, qubit_count })
        }
    }

    fn check_moment(&self, moment: usize) -> EditResult<()> {
        let moment_count = self.state.moment_count;
        if moment < moment_count {
            Ok(())
        } else {
            Err(EditError::MomentOutOfRange {
                moment,
                moment_count,
            })
        }
    }

    fn insert(&mut self, gate: Gate) {
        self.by_slot.insert(gate.slot(), gate.id);
        self.by_id.insert(gate.id, self.state.gates.len());
        self.state.gates.push(gate);
    }

    fn take(&mut self, id: GateId) -> Option<Gate> {
        let pos = self.by_id.remove(&id)?;
        let gate = self.state.gates.swap_remove(pos);
        self.by_slot.remove(&gate.slot());
        if let Some(moved) = self.state.gates.get(pos) {
            self.by_id.insert(moved.id, pos);
        }
        Some(gate)
    }

    fn reindex(&mut self) {
        self.by_slot.clear();
        self.by_id.clear();
        for (pos, gate) in self.state.gates.iter().enumerate() {
            self.by_slot.insert(gate.slot(), gate.id);
            self.by_id.insert(gate.id, pos);
        }
    }
}

impl Default for CircuitEditor {
    fn default() -> Self {
        Self::new(CircuitDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    fn editor() -> CircuitEditor {
        CircuitEditor::default()
    }

    #[test]
    fn test_place_creates_gate_with_defaults() {
        let mut ed = editor();
        let id = ed.place_gate(0, 0, GateKind::Cnot).unwrap();
        let gate = ed.gate(id).unwrap();
        assert_eq!(gate.target, Some(1));
        assert_eq!(ed.gate_at(0, 0).map(|g| g.id), Some(id));

        let rx = ed.place_gate(1, 2, GateKind::Rx).unwrap();
        assert_eq!(ed.gate(rx).unwrap().parameter, Some(FRAC_PI_2));
    }

    #[test]
    fn test_place_replaces_occupant_with_fresh_id() {
        let mut ed = editor();
        let first = ed.place_gate(1, 1, GateKind::H).unwrap();
        let second = ed.place_gate(1, 1, GateKind::X).unwrap();
        assert_ne!(first, second);
        assert!(ed.gate(first).is_none());
        assert_eq!(ed.state().num_gates(), 1);
        assert_eq!(ed.gate_at(1, 1).unwrap().kind, GateKind::X);
    }

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut ed = editor();
        assert!(matches!(
            ed.place_gate(3, 0, GateKind::H),
            Err(EditError::QubitOutOfRange { qubit: 3, .. })
        ));
        assert!(matches!(
            ed.place_gate(0, 10, GateKind::H),
            Err(EditError::MomentOutOfRange { moment: 10, .. })
        ));
        assert!(ed.state().is_empty());
    }

    #[test]
    fn test_update_target_validation_leaves_state_untouched() {
        let mut ed = editor();
        let id = ed.place_gate(0, 0, GateKind::Cnot).unwrap();
        let before = ed.state().clone();

        let err = ed
            .update_gate(id, &GateChanges::new().with_target(0))
            .unwrap_err();
        assert_eq!(err, EditError::SelfTarget(0));

        let err = ed
            .update_gate(id, &GateChanges::new().with_target(9))
            .unwrap_err();
        assert!(matches!(err, EditError::QubitOutOfRange { qubit: 9, .. }));

        assert_eq!(ed.state(), &before);
    }

    #[test]
    fn test_update_is_all_or_nothing() {
        let mut ed = editor();
        let id = ed.place_gate(0, 0, GateKind::Cnot).unwrap();
        // valid moment but invalid target: nothing applies
        let changes = GateChanges::new().with_moment(4).with_target(0);
        assert!(ed.update_gate(id, &changes).is_err());
        assert_eq!(ed.gate(id).unwrap().moment, 0);
        assert_eq!(ed.gate_at(0, 0).map(|g| g.id), Some(id));
    }

    #[test]
    fn test_update_rejects_fields_for_wrong_type() {
        let mut ed = editor();
        let h = ed.place_gate(0, 0, GateKind::H).unwrap();
        assert!(matches!(
            ed.update_gate(h, &GateChanges::new().with_target(1)),
            Err(EditError::FieldNotApplicable { field: "target", .. })
        ));
        assert!(matches!(
            ed.update_gate(h, &GateChanges::new().with_parameter(1.0)),
            Err(EditError::FieldNotApplicable { field: "parameter", .. })
        ));
    }

    #[test]
    fn test_update_rejects_non_finite_parameter() {
        let mut ed = editor();
        let rz = ed.place_gate(2, 0, GateKind::Rz).unwrap();
        assert!(matches!(
            ed.update_gate(rz, &GateChanges::new().with_parameter(f64::NAN)),
            Err(EditError::InvalidParameter(_))
        ));
        ed.update_gate(rz, &GateChanges::new().with_parameter(0.3))
            .unwrap();
        assert_eq!(ed.gate(rz).unwrap().parameter, Some(0.3));
    }

    #[test]
    fn test_update_moves_gate_and_slot_index() {
        let mut ed = editor();
        let id = ed.place_gate(0, 0, GateKind::X).unwrap();
        ed.update_gate(id, &GateChanges::new().with_qubit(2).with_moment(5))
            .unwrap();
        assert!(ed.gate_at(0, 0).is_none());
        assert_eq!(ed.gate_at(2, 5).map(|g| g.id), Some(id));
    }

    #[test]
    fn test_update_refuses_occupied_slot() {
        let mut ed = editor();
        let a = ed.place_gate(0, 0, GateKind::X).unwrap();
        ed.place_gate(1, 0, GateKind::Y).unwrap();
        assert_eq!(
            ed.update_gate(a, &GateChanges::new().with_qubit(1)),
            Err(EditError::SlotOccupied {
                qubit: 1,
                moment: 0
            })
        );
    }

    #[test]
    fn test_update_controls() {
        let mut ed = editor();
        ed.add_qubit(2, InsertPosition::After).unwrap();
        let id = ed.place_gate(0, 0, GateKind::Cnot).unwrap();

        assert_eq!(
            ed.update_gate(id, &GateChanges::new().with_controls(vec![1])),
            Err(EditError::ControlOverlap(1))
        );
        assert_eq!(
            ed.update_gate(id, &GateChanges::new().with_controls(vec![2, 2])),
            Err(EditError::DuplicateControl(2))
        );

        ed.update_gate(id, &GateChanges::new().with_controls(vec![3, 2]))
            .unwrap();
        assert_eq!(ed.gate(id).unwrap().controls, Some(vec![3, 2]));

        ed.update_gate(id, &GateChanges::new().with_controls(vec![]))
            .unwrap();
        assert_eq!(ed.gate(id).unwrap().controls, None);
    }

    #[test]
    fn test_remove_gate_keeps_indices_consistent() {
        let mut ed = editor();
        let a = ed.place_gate(0, 0, GateKind::H).unwrap();
        let b = ed.place_gate(1, 0, GateKind::X).unwrap();
        let c = ed.place_gate(2, 0, GateKind::Y).unwrap();

        let removed = ed.remove_gate(a).unwrap();
        assert_eq!(removed.id, a);
        assert_eq!(ed.gate(b).unwrap().qubit, 1);
        assert_eq!(ed.gate(c).unwrap().qubit, 2);
        assert_eq!(ed.gate_at(2, 0).map(|g| g.id), Some(c));
        assert_eq!(ed.remove_gate(a), Err(EditError::GateNotFound(a)));
    }

    #[test]
    fn test_add_qubit_before_and_after() {
        let mut ed = editor();
        let cx = ed.place_gate(0, 0, GateKind::Cnot).unwrap();

        assert_eq!(ed.add_qubit(1, InsertPosition::Before).unwrap(), 1);
        assert_eq!(ed.state().qubit_count(), 4);
        assert_eq!(ed.state().qubit_names(), ["0", "1", "1", "2"]);
        let gate = ed.gate(cx).unwrap();
        assert_eq!((gate.qubit, gate.target), (0, Some(2)));

        assert_eq!(ed.add_qubit(3, InsertPosition::After).unwrap(), 4);
        assert_eq!(ed.state().qubit_count(), 5);
        assert_eq!(ed.gate_at(0, 0).map(|g| g.id), Some(cx));
    }

    #[test]
    fn test_add_qubit_rejects_bad_anchor() {
        let mut ed = editor();
        assert!(ed.add_qubit(3, InsertPosition::Before).is_err());
        assert_eq!(ed.state().qubit_count(), 3);
    }

    #[test]
    fn test_remove_qubit_drops_referencing_gates() {
        let mut ed = editor();
        let cx = ed.place_gate(0, 0, GateKind::Cnot).unwrap(); // 0 -> 1
        let h = ed.place_gate(2, 1, GateKind::H).unwrap();
        let x = ed.place_gate(1, 2, GateKind::X).unwrap();

        assert_eq!(ed.remove_qubit(1).unwrap(), Some(2));
        assert!(ed.gate(cx).is_none());
        assert!(ed.gate(x).is_none());
        assert_eq!(ed.gate(h).unwrap().qubit, 1);
        assert_eq!(ed.state().qubit_names(), ["0", "2"]);
        assert_eq!(ed.gate_at(1, 1).map(|g| g.id), Some(h));
    }

    #[test]
    fn test_remove_qubit_drops_gate_referenced_only_as_control() {
        let mut ed = editor();
        let cx = ed.place_gate(0, 0, GateKind::Cnot).unwrap();
        ed.update_gate(cx, &GateChanges::new().with_controls(vec![2]))
            .unwrap();
        ed.remove_qubit(2).unwrap();
        assert!(ed.gate(cx).is_none());
    }

    #[test]
    fn test_remove_last_qubit_is_noop() {
        let mut ed = CircuitEditor::new(CircuitDefaults {
            qubits: 1,
            moments: 4,
        });
        let h = ed.place_gate(0, 0, GateKind::H).unwrap();
        assert_eq!(ed.remove_qubit(0).unwrap(), None);
        assert_eq!(ed.state().qubit_count(), 1);
        assert!(ed.gate(h).is_some());
    }

    #[test]
    fn test_rename_qubit() {
        let mut ed = editor();
        ed.rename_qubit(1, "ancilla").unwrap();
        ed.rename_qubit(2, "ancilla").unwrap();
        assert_eq!(ed.state().qubit_names(), ["0", "ancilla", "ancilla"]);
        assert!(ed.rename_qubit(3, "x").is_err());
    }

    #[test]
    fn test_extend_moments_only_grows() {
        let mut ed = editor();
        assert_eq!(ed.extend_moments(5), 15);
        assert_eq!(ed.extend_moments(0), 15);
        ed.place_gate(0, 14, GateKind::H).unwrap();
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut ed = editor();
        ed.place_gate(0, 0, GateKind::H).unwrap();
        ed.add_qubit(0, InsertPosition::After).unwrap();
        ed.extend_moments(3);
        ed.reset();
        assert_eq!(ed.state(), &CircuitState::default());
        assert!(ed.gate_at(0, 0).is_none());
    }

    #[test]
    fn test_from_state_indexes_existing_gates() {
        let mut source = editor();
        let id = source.place_gate(2, 3, GateKind::Z).unwrap();
        let resumed = CircuitEditor::from_state(source.state().clone(), CircuitDefaults::default());
        assert_eq!(resumed.gate_at(2, 3).map(|g| g.id), Some(id));
    }
}
