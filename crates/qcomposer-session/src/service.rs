//! The simulation and code-generation collaborator.
//!
//! ```text
//!   CircuitRequest ──→ simulate()       ──→ SimulationResult
//!                 └──→ generate_code()  ──→ CodeResult
//! ```
//!
//! Both calls are independent: a session issues them concurrently after
//! every committed edit and applies each answer on its own channel.
//!
//! | Method | Kind | Required | Returns |
//! |--------|------|----------|---------|
//! | `name()` | sync | yes | `&str` |
//! | `simulate()` | async | yes | `ServiceResult<SimulationResult>` |
//! | `generate_code()` | async | yes | `ServiceResult<CodeResult>` |
//! | `health()` | async | provided | `ServiceResult<()>` |

use async_trait::async_trait;
use qcomposer_wire::{CircuitRequest, CodeResult, SimulationResult};

use crate::error::ServiceResult;

/// A service that simulates circuits and renders them as code.
///
/// Implementations must be `Send + Sync` so a session can share one
/// instance across the tasks it spawns.
#[async_trait]
pub trait CircuitService: Send + Sync {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Simulate `request` and return the final (and optionally per-moment)
    /// state.
    async fn simulate(&self, request: &CircuitRequest) -> ServiceResult<SimulationResult>;

    /// Render `request` as a diagram and program source.
    async fn generate_code(&self, request: &CircuitRequest) -> ServiceResult<CodeResult>;

    /// Check that the service is reachable.
    async fn health(&self) -> ServiceResult<()> {
        Ok(())
    }
}

/// Which of the two answers a reply carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// `simulate()` answers.
    Simulation,
    /// `generate_code()` answers.
    Code,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Simulation => write!(f, "simulation"),
            Channel::Code => write!(f, "code"),
        }
    }
}
