//! Documents returned by the simulation and code-generation service.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Moment tag of the step that shows the state before any gate.
pub const INITIAL_MOMENT: i64 = -1;

/// One state-vector amplitude as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Amplitude {
    /// Real part.
    pub real: f64,
    /// Imaginary part.
    pub imag: f64,
}

impl Amplitude {
    /// As a complex number.
    pub fn to_complex(self) -> Complex64 {
        Complex64::new(self.real, self.imag)
    }

    /// Measurement probability, `|a|²`.
    pub fn probability(self) -> f64 {
        self.to_complex().norm_sqr()
    }
}

impl From<Complex64> for Amplitude {
    fn from(c: Complex64) -> Self {
        Self {
            real: c.re,
            imag: c.im,
        }
    }
}

/// Bloch vector `[x, y, z]` of one qubit.
pub type BlochVector = [f64; 3];

/// State after the gates of one moment (or before any gate, for
/// [`INITIAL_MOMENT`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    /// `-1` for the initial state, otherwise the moment just applied.
    pub moment: i64,
    /// Amplitudes in computational-basis order.
    pub state_vector: Vec<Amplitude>,
    /// One Bloch vector per qubit.
    pub bloch_vectors: Vec<BlochVector>,
}

/// Response of `/simulate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Final amplitudes.
    pub state_vector: Vec<Amplitude>,
    /// Final Bloch vectors, one per qubit.
    pub bloch_vectors: Vec<BlochVector>,
    /// Per-moment snapshots, when the service provides them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<SimulationStep>,
}

impl SimulationResult {
    /// The step tagged with exactly `moment`.
    pub fn step(&self, moment: i64) -> Option<&SimulationStep> {
        self.steps.iter().find(|s| s.moment == moment)
    }
}

/// Response of `/code`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeResult {
    /// Text diagram of the circuit.
    pub diagram: String,
    /// Generated program source.
    pub source_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amplitude_probability() {
        let a = Amplitude {
            real: 0.6,
            imag: 0.8,
        };
        assert!((a.probability() - 1.0).abs() < 1e-12);
        assert_eq!(Amplitude::from(a.to_complex()), a);
    }

    #[test]
    fn test_simulation_result_without_steps() {
        let json = r#"{
            "state_vector": [{"real": 1.0, "imag": 0.0}, {"real": 0.0, "imag": 0.0}],
            "bloch_vectors": [[0.0, 0.0, 1.0]]
        }"#;
        let result: SimulationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.state_vector.len(), 2);
        assert_eq!(result.bloch_vectors[0], [0.0, 0.0, 1.0]);
        assert!(result.steps.is_empty());
    }

    #[test]
    fn test_simulation_result_with_steps() {
        let json = r#"{
            "state_vector": [],
            "bloch_vectors": [],
            "steps": [
                {"moment": -1, "state_vector": [], "bloch_vectors": [[0, 0, 1]]},
                {"moment": 0, "state_vector": [], "bloch_vectors": [[1, 0, 0]]}
            ]
        }"#;
        let result: SimulationResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.step(INITIAL_MOMENT).unwrap().bloch_vectors[0], [0.0, 0.0, 1.0]);
        assert_eq!(result.step(0).unwrap().bloch_vectors[0], [1.0, 0.0, 0.0]);
        assert!(result.step(1).is_none());
    }

    #[test]
    fn test_code_result_parse() {
        let json = r#"{"diagram": "0: ───H───", "source_code": "import cirq"}"#;
        let code: CodeResult = serde_json::from_str(json).unwrap();
        assert_eq!(code.source_code, "import cirq");
    }
}
