//! Episode Configuration: The Single Input Surface of a Run
//!
//! Every knob an episode needs lives here, from the manifold topology
//! (Ω) and forcing sweep to the analysis thresholds. Configurations are
//! serde-friendly so they can be loaded from JSON; missing fields fall
//! back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::PhenotypeThresholds;
use crate::cusum::RegimeShiftConfig;
use crate::error::{Result, SimulationError};
use crate::forcing::ForcingMode;
use crate::manifold;
use crate::policy::BanditEnvironment;
use crate::systems::{InitialBranch, IntegrationScheme};

/// Smallest default jump threshold, used when Ω is tiny or zero
pub const MIN_JUMP_THRESHOLD: f64 = 0.1;

/// Full configuration of one episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeConfig {
    /// Stability factor Ω (fixed for the run)
    pub omega: f64,
    /// Lower drive bound E_min
    pub e_min: f64,
    /// Upper drive bound E_max
    pub e_max: f64,
    /// Number of recorded steps
    pub n_steps: usize,
    /// Integration timestep
    pub dt: f64,
    /// Langevin noise amplitude
    pub noise_std: f64,
    /// Scripted ramp or reward-coupled drive
    pub forcing_mode: ForcingMode,
    /// η in E ← E + η·PE (MDP-coupled mode)
    pub reward_learning_rate: f64,
    /// EMA decay of the reward baseline
    pub baseline_decay: f64,
    /// Logistic gain of the β link
    pub link_gain: f64,
    /// Payoffs of the two arms
    pub environment: BanditEnvironment,
    /// Euler–Maruyama or quasi-static update
    pub integration: IntegrationScheme,
    /// Which equilibrium the state starts on
    pub initial_branch: InitialBranch,
    /// Unrecorded relaxation steps at the initial drive
    pub warmup_steps: usize,
    /// Per-step |Δx| above which a jump is recorded (None: √Ω)
    pub jump_threshold: Option<f64>,
    pub phenotype_thresholds: PhenotypeThresholds,
    pub regime_shift: RegimeShiftConfig,
    /// Seed of the episode's private random stream
    pub seed: u64,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            omega: 1.5,
            e_min: -4.0,
            e_max: 4.0,
            n_steps: 400,
            dt: 0.01,
            noise_std: 0.05,
            forcing_mode: ForcingMode::Scripted,
            reward_learning_rate: 0.05,
            baseline_decay: 0.1,
            link_gain: 4.0,
            environment: BanditEnvironment::default(),
            integration: IntegrationScheme::EulerMaruyama,
            initial_branch: InitialBranch::GlobalMinimum,
            warmup_steps: 0,
            jump_threshold: None,
            phenotype_thresholds: PhenotypeThresholds::default(),
            regime_shift: RegimeShiftConfig::default(),
            seed: 42,
        }
    }
}

impl EpisodeConfig {
    pub fn with_omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    pub fn with_drive_range(mut self, e_min: f64, e_max: f64) -> Self {
        self.e_min = e_min;
        self.e_max = e_max;
        self
    }

    pub fn with_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    pub fn with_dt(mut self, dt: f64) -> Self {
        self.dt = dt;
        self
    }

    pub fn with_noise(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    pub fn with_forcing_mode(mut self, mode: ForcingMode) -> Self {
        self.forcing_mode = mode;
        self
    }

    pub fn with_reward_learning_rate(mut self, rate: f64) -> Self {
        self.reward_learning_rate = rate;
        self
    }

    pub fn with_integration(mut self, scheme: IntegrationScheme) -> Self {
        self.integration = scheme;
        self
    }

    pub fn with_initial_branch(mut self, branch: InitialBranch) -> Self {
        self.initial_branch = branch;
        self
    }

    pub fn with_warmup(mut self, steps: usize) -> Self {
        self.warmup_steps = steps;
        self
    }

    pub fn with_jump_threshold(mut self, threshold: f64) -> Self {
        self.jump_threshold = Some(threshold);
        self
    }

    pub fn with_phenotype_thresholds(mut self, thresholds: PhenotypeThresholds) -> Self {
        self.phenotype_thresholds = thresholds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Jump threshold in effect: the configured value, else half the
    /// basin separation (√Ω) floored at [`MIN_JUMP_THRESHOLD`]
    pub fn effective_jump_threshold(&self) -> f64 {
        self.jump_threshold.unwrap_or_else(|| {
            (manifold::basin_separation(self.omega) / 2.0).max(MIN_JUMP_THRESHOLD)
        })
    }

    /// Load and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject non-finite and out-of-domain values before any step runs
    pub fn validate(&self) -> Result<()> {
        non_negative("omega", self.omega)?;
        finite("e_min", self.e_min)?;
        finite("e_max", self.e_max)?;
        if self.e_min >= self.e_max {
            return Err(SimulationError::invalid(
                "e_max",
                format!("must exceed e_min ({} >= {})", self.e_min, self.e_max),
            ));
        }
        if self.n_steps == 0 {
            return Err(SimulationError::invalid("n_steps", "must be at least 1"));
        }
        positive("dt", self.dt)?;
        non_negative("noise_std", self.noise_std)?;
        non_negative("reward_learning_rate", self.reward_learning_rate)?;
        positive("baseline_decay", self.baseline_decay)?;
        if self.baseline_decay > 1.0 {
            return Err(SimulationError::invalid(
                "baseline_decay",
                format!("must lie in (0, 1], got {}", self.baseline_decay),
            ));
        }
        positive("link_gain", self.link_gain)?;
        if let Some(threshold) = self.jump_threshold {
            positive("jump_threshold", threshold)?;
        }

        self.environment.validate()?;
        self.phenotype_thresholds.validate()?;
        self.regime_shift.validate()?;
        Ok(())
    }
}

pub(crate) fn finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(name, format!("must be finite, got {}", value)))
    }
}

pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value < 0.0 {
        return Err(SimulationError::invalid(name, format!("must be >= 0, got {}", value)));
    }
    Ok(())
}

pub(crate) fn positive(name: &'static str, value: f64) -> Result<()> {
    finite(name, value)?;
    if value <= 0.0 {
        return Err(SimulationError::invalid(name, format!("must be > 0, got {}", value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(config: EpisodeConfig, field: &str) {
        match config.validate() {
            Err(SimulationError::InvalidParameter { name, .. }) => assert_eq!(name, field),
            other => panic!("expected InvalidParameter({}), got {:?}", field, other),
        }
    }

    #[test]
    fn test_default_is_valid() {
        assert!(EpisodeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_domain() {
        rejected(EpisodeConfig::default().with_omega(f64::NAN), "omega");
        rejected(EpisodeConfig::default().with_omega(-1.0), "omega");
        rejected(EpisodeConfig::default().with_drive_range(2.0, -2.0), "e_max");
        rejected(EpisodeConfig::default().with_drive_range(f64::NEG_INFINITY, 1.0), "e_min");
        rejected(EpisodeConfig::default().with_steps(0), "n_steps");
        rejected(EpisodeConfig::default().with_dt(0.0), "dt");
        rejected(EpisodeConfig::default().with_dt(f64::INFINITY), "dt");
        rejected(EpisodeConfig::default().with_noise(-0.1), "noise_std");
        rejected(EpisodeConfig::default().with_jump_threshold(0.0), "jump_threshold");
    }

    #[test]
    fn test_default_jump_threshold_tracks_basin() {
        let config = EpisodeConfig::default().with_omega(4.0);
        assert_eq!(config.effective_jump_threshold(), 2.0);

        let flat = EpisodeConfig::default().with_omega(0.0);
        assert_eq!(flat.effective_jump_threshold(), MIN_JUMP_THRESHOLD);

        let explicit = flat.with_jump_threshold(0.7);
        assert_eq!(explicit.effective_jump_threshold(), 0.7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EpisodeConfig::from_json_str(
            r#"{ "omega": 3.0, "forcing_mode": "mdp_coupled", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.omega, 3.0);
        assert_eq!(config.forcing_mode, ForcingMode::MdpCoupled);
        assert_eq!(config.seed, 7);
        assert_eq!(config.n_steps, EpisodeConfig::default().n_steps);
    }

    #[test]
    fn test_json_validation_applies() {
        let err = EpisodeConfig::from_json_str(r#"{ "dt": -1.0 }"#).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidParameter { name: "dt", .. }));

        let err = EpisodeConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SimulationError::Json(_)));
    }
}
