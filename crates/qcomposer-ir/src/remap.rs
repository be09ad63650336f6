//! Bulk qubit renumbering.
//!
//! Inserting or removing a qubit line shifts every index at or past the edit
//! point. All reference fields of a gate go through [`Gate::remap_qubits`],
//! so a new field that holds a qubit index only has to be added there.

use std::cmp::Ordering;

use crate::gate::Gate;

/// A single insertion or deletion point on the qubit axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QubitShift {
    /// A new line appears at this index; indices `>= at` move down by one.
    Insert(usize),
    /// The line at this index disappears; indices `> at` move up by one.
    Remove(usize),
}

impl QubitShift {
    /// New index for `qubit`, or `None` if the line it names is removed.
    pub fn apply(self, qubit: usize) -> Option<usize> {
        match self {
            QubitShift::Insert(at) if qubit >= at => Some(qubit + 1),
            QubitShift::Insert(_) => Some(qubit),
            QubitShift::Remove(at) => match qubit.cmp(&at) {
                Ordering::Less => Some(qubit),
                Ordering::Equal => None,
                Ordering::Greater => Some(qubit - 1),
            },
        }
    }
}

impl Gate {
    /// Rewrite every qubit reference through `map`.
    ///
    /// Returns `None` as soon as any reference maps to `None`; the gate is
    /// then dropped as a whole rather than partially edited.
    pub fn remap_qubits(&self, mut map: impl FnMut(usize) -> Option<usize>) -> Option<Gate> {
        let qubit = map(self.qubit)?;
        let target = match self.target {
            Some(target) => Some(map(target)?),
            None => None,
        };
        let controls = match &self.controls {
            Some(controls) => Some(
                controls
                    .iter()
                    .map(|&c| map(c))
                    .collect::<Option<Vec<_>>>()?,
            ),
            None => None,
        };

        Some(Gate {
            id: self.id,
            kind: self.kind,
            qubit,
            moment: self.moment,
            target,
            parameter: self.parameter,
            controls,
        })
    }
}

/// Apply `shift` to every gate in one pass, dropping gates that reference
/// a removed line.
pub fn shift_gates(gates: &[Gate], shift: QubitShift) -> Vec<Gate> {
    gates
        .iter()
        .filter_map(|gate| gate.remap_qubits(|q| shift.apply(q)))
        .collect()
}
