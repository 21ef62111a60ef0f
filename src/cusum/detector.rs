//! CUSUM Detector: Sequential Change-Point Detection
//!
//! Implements Page's CUSUM algorithm with re-arming after each event.

use serde::{Deserialize, Serialize};

use crate::config::{non_negative, positive};
use crate::error::{Result, SimulationError};

/// Floor on the reference std so a perfectly flat calibration window
/// does not divide by zero
const MIN_REFERENCE_STD: f64 = 1e-10;

/// Parameters of regime-shift detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegimeShiftConfig {
    /// Allowance k, in units of the basin half-width √Ω
    pub allowance: f64,
    /// Threshold h, in units of the basin half-width √Ω
    pub threshold: f64,
    /// Consecutive in-control observations needed to re-arm after an event
    pub rearm_steps: usize,
}

impl Default for RegimeShiftConfig {
    fn default() -> Self {
        Self {
            allowance: 0.5,
            threshold: 5.0,
            rearm_steps: 3,
        }
    }
}

impl RegimeShiftConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("regime_shift.allowance", self.allowance)?;
        positive("regime_shift.threshold", self.threshold)?;
        if self.rearm_steps == 0 {
            return Err(SimulationError::invalid(
                "regime_shift.rearm_steps",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Detection event with timing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionEvent {
    /// Index (within the monitored stream) when the threshold was crossed
    pub detection_time: usize,
    /// CUSUM value at detection
    pub cusum_value: f64,
    /// Last index at which C was zero (retrospective onset)
    pub estimated_change_point: usize,
    /// Statistic at detection
    pub statistic_value: f64,
}

/// Results from CUSUM analysis
#[derive(Debug, Clone)]
pub struct CusumResult {
    /// Sequence of CUSUM values C(t)
    pub cusum_values: Vec<f64>,
    pub events: Vec<DetectionEvent>,
    /// Reference mean μ₀
    pub reference_mean: f64,
    /// Reference std σ₀
    pub reference_std: f64,
}

/// Default in-control run that re-arms a detector after an event
const DEFAULT_REARM_STEPS: usize = 3;

/// One-sided CUSUM detector
#[derive(Debug, Clone)]
pub struct CusumDetector {
    reference_mean: f64,
    reference_std: f64,
    /// Allowance k (σ units)
    allowance: f64,
    /// Threshold h (σ units)
    threshold: f64,
    current_cusum: f64,
    cusum_history: Vec<f64>,
    /// Cleared after an event
    armed: bool,
    /// In-control observations required to re-arm
    rearm_steps: usize,
    /// In-control observations seen since the last event
    in_control_run: usize,
    last_reset_time: usize,
    events: Vec<DetectionEvent>,
}

impl CusumDetector {
    /// Detector with a known reference regime (μ₀, σ₀)
    pub fn new(reference_mean: f64, reference_std: f64, allowance: f64, threshold: f64) -> Self {
        Self {
            reference_mean,
            reference_std: reference_std.max(MIN_REFERENCE_STD),
            allowance,
            threshold,
            current_cusum: 0.0,
            cusum_history: Vec::new(),
            armed: true,
            rearm_steps: DEFAULT_REARM_STEPS,
            in_control_run: 0,
            last_reset_time: 0,
            events: Vec::new(),
        }
    }

    /// Detector calibrated on `reference_data` (the H₀ regime).
    ///
    /// Returns `None` for an empty reference window.
    pub fn calibrated(
        reference_data: &[f64],
        allowance_sigmas: f64,
        threshold_sigmas: f64,
    ) -> Option<Self> {
        if reference_data.is_empty() {
            return None;
        }

        let n = reference_data.len() as f64;
        let reference_mean = reference_data.iter().sum::<f64>() / n;
        let variance: f64 = reference_data.iter()
            .map(|x| (x - reference_mean).powi(2))
            .sum::<f64>() / (n - 1.0).max(1.0);

        Some(Self::new(reference_mean, variance.sqrt(), allowance_sigmas, threshold_sigmas))
    }

    /// Set the in-control run length that re-arms the detector (at least 1)
    pub fn with_rearm_steps(mut self, steps: usize) -> Self {
        self.rearm_steps = steps.max(1);
        self
    }

    /// Process a single observation, returning the event it triggers.
    ///
    /// After an event the sum is held at zero until `rearm_steps`
    /// consecutive observations fall inside the allowance band, so noise
    /// in the middle of a sustained shift cannot re-arm it.
    pub fn update(&mut self, statistic: f64) -> Option<DetectionEvent> {
        let t = self.cusum_history.len();
        let increment = (statistic - self.reference_mean) / self.reference_std - self.allowance;

        if !self.armed {
            self.current_cusum = 0.0;
            self.cusum_history.push(0.0);
            self.last_reset_time = t;
            self.in_control_run = if increment <= 0.0 { self.in_control_run + 1 } else { 0 };
            if self.in_control_run >= self.rearm_steps {
                self.armed = true;
            }
            return None;
        }

        self.current_cusum = (self.current_cusum + increment).max(0.0);
        self.cusum_history.push(self.current_cusum);
        if self.current_cusum == 0.0 {
            self.last_reset_time = t;
        }

        if self.current_cusum > self.threshold {
            let event = DetectionEvent {
                detection_time: t,
                cusum_value: self.current_cusum,
                estimated_change_point: self.last_reset_time,
                statistic_value: statistic,
            };
            self.events.push(event);
            self.armed = false;
            self.in_control_run = 0;
            self.current_cusum = 0.0;
            self.last_reset_time = t;
            return Some(event);
        }

        None
    }

    /// Whether the next out-of-control run can raise an event
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Process multiple observations
    pub fn update_batch(&mut self, statistics: &[f64]) -> CusumResult {
        for &s in statistics {
            self.update(s);
        }
        self.result()
    }

    pub fn result(&self) -> CusumResult {
        CusumResult {
            cusum_values: self.cusum_history.clone(),
            events: self.events.clone(),
            reference_mean: self.reference_mean,
            reference_std: self.reference_std,
        }
    }

    /// Current CUSUM value
    pub fn current_value(&self) -> f64 {
        self.current_cusum
    }
}
