//! Error taxonomy for configuration, integration and analysis.
//!
//! Validation failures are fatal and surface before any step runs.
//! Numerical divergence aborts an episode but hands back the partial
//! trajectory for diagnostics. Degenerate manifold numerics are not
//! errors at all: see [`DegenerateManifoldWarning`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::episode::Trajectory;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Non-finite or out-of-domain configuration value
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Integrator produced a non-finite state
    #[error("state diverged to {value} at step {step} (dt too large or forcing too extreme)")]
    NumericalDivergence {
        step: usize,
        value: f64,
        /// Records up to the last finite step, status `Failed`
        trajectory: Box<Trajectory>,
    },

    /// Trajectory cannot be analysed (empty, too short, or not completed)
    #[error("invalid trajectory: {0}")]
    InvalidTrajectory(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimulationError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Partial trajectory of an aborted episode, if any
    pub fn partial_trajectory(&self) -> Option<&Trajectory> {
        match self {
            SimulationError::NumericalDivergence { trajectory, .. } => Some(trajectory),
            _ => None,
        }
    }
}

/// Non-fatal notice that equilibrium separation collapsed near a fold.
///
/// Emitted through `tracing::warn!` and collected on the trajectory;
/// the episode continues with best-effort values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DegenerateManifoldWarning {
    pub step: usize,
    pub omega: f64,
    pub drive: f64,
    /// Smallest gap between adjacent equilibria
    pub separation: f64,
}
