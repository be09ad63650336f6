//! Choosing which time slice of a simulation to display.

use crate::response::{Amplitude, BlochVector, SimulationResult};

/// The vectors to display for one time slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateView<'a> {
    /// Moment of the selected step, or `None` for the final result.
    pub moment: Option<i64>,
    /// Amplitudes to show.
    pub state_vector: &'a [Amplitude],
    /// Bloch vectors to show, one per qubit.
    pub bloch_vectors: &'a [BlochVector],
}

impl StateView<'_> {
    /// Whether this is the whole-circuit result rather than a step.
    pub fn is_final(&self) -> bool {
        self.moment.is_none()
    }

    /// Measurement probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.state_vector.iter().map(|a| a.probability()).collect()
    }
}

/// Resolve the slice to show for `selected`.
///
/// A selected moment with a step of exactly that moment shows the step;
/// anything else (no selection, or no such step) shows the final result.
pub fn select_view(result: &SimulationResult, selected: Option<i64>) -> StateView<'_> {
    match selected.and_then(|moment| result.step(moment)) {
        Some(step) => StateView {
            moment: Some(step.moment),
            state_vector: &step.state_vector,
            bloch_vectors: &step.bloch_vectors,
        },
        None => StateView {
            moment: None,
            state_vector: &result.state_vector,
            bloch_vectors: &result.bloch_vectors,
        },
    }
}

impl SimulationResult {
    /// Shorthand for [`select_view`].
    pub fn view(&self, selected: Option<i64>) -> StateView<'_> {
        select_view(self, selected)
    }
}
