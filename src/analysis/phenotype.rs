//! Phenotype classification from (Ω, A, jump count).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{finite, non_negative};
use crate::error::{Result, SimulationError};

/// Behavioral phenotype derived from a completed episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhenotypeLabel {
    /// Shallow basins, frequent switching, little hysteresis
    #[serde(rename = "ADHD_like")]
    AdhdLike,
    /// Deep basins, wide hysteresis, rare catastrophic transitions
    #[serde(rename = "ASD_like")]
    AsdLike,
    Mixed,
    Undetermined,
}

impl fmt::Display for PhenotypeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhenotypeLabel::AdhdLike => write!(f, "ADHD_like"),
            PhenotypeLabel::AsdLike => write!(f, "ASD_like"),
            PhenotypeLabel::Mixed => write!(f, "Mixed"),
            PhenotypeLabel::Undetermined => write!(f, "Undetermined"),
        }
    }
}

/// Empirical cut points for classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhenotypeThresholds {
    /// Ω below this counts as a shallow manifold
    pub omega_low: f64,
    /// Ω above this counts as a deep manifold
    pub omega_high: f64,
    /// Loop area at or above this counts as hysteretic
    pub area_high: f64,
    /// Jumps per step transition at or above this count as switching
    pub min_jump_rate: f64,
}

impl Default for PhenotypeThresholds {
    fn default() -> Self {
        Self {
            omega_low: 1.0,
            omega_high: 2.0,
            area_high: 1.0,
            min_jump_rate: 0.05,
        }
    }
}

impl PhenotypeThresholds {
    pub fn validate(&self) -> Result<()> {
        finite("phenotype_thresholds.omega_low", self.omega_low)?;
        finite("phenotype_thresholds.omega_high", self.omega_high)?;
        if self.omega_low > self.omega_high {
            return Err(SimulationError::invalid(
                "phenotype_thresholds.omega_low",
                format!("must not exceed omega_high ({} > {})", self.omega_low, self.omega_high),
            ));
        }
        non_negative("phenotype_thresholds.area_high", self.area_high)?;
        non_negative("phenotype_thresholds.min_jump_rate", self.min_jump_rate)?;
        if self.min_jump_rate > 1.0 {
            return Err(SimulationError::invalid(
                "phenotype_thresholds.min_jump_rate",
                format!("must be <= 1, got {}", self.min_jump_rate),
            ));
        }
        Ok(())
    }

    /// Jumps per step transition
    pub fn jump_rate(jump_count: usize, n_steps: usize) -> f64 {
        jump_count as f64 / n_steps.saturating_sub(1).max(1) as f64
    }

    /// Label an episode.
    ///
    /// Switching and hysteresis together give `Mixed`. Otherwise a shallow
    /// manifold without hysteresis is `ADHD_like` and a deep manifold
    /// without switching is `ASD_like`.
    ///
    /// Frequent jumps and a large area strengthen those labels but are not
    /// required: under Euler–Maruyama with small dt single-step jumps are
    /// rare, and a drive range that stays inside the folds of a deep
    /// manifold leaves little area. For such runs the label is decided by
    /// Ω alone, with A and the jump rate only ruling labels out.
    pub fn classify(
        &self,
        omega: f64,
        area: f64,
        jump_count: usize,
        n_steps: usize,
    ) -> PhenotypeLabel {
        let switching = Self::jump_rate(jump_count, n_steps) >= self.min_jump_rate;
        let hysteretic = area >= self.area_high;

        if switching && hysteretic {
            PhenotypeLabel::Mixed
        } else if omega < self.omega_low && !hysteretic {
            PhenotypeLabel::AdhdLike
        } else if omega > self.omega_high && !switching {
            PhenotypeLabel::AsdLike
        } else {
            PhenotypeLabel::Undetermined
        }
    }
}

/// Classify with explicit thresholds
pub fn classify(
    omega: f64,
    area: f64,
    jump_count: usize,
    n_steps: usize,
    thresholds: &PhenotypeThresholds,
) -> PhenotypeLabel {
    thresholds.classify(omega, area, jump_count, n_steps)
}
