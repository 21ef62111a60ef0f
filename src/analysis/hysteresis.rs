//! Hysteresis loop area, jump events and regime shifts.

use ndarray::{s, Array1};
use serde::{Deserialize, Serialize};

use super::behavior::BehaviorSummary;
use super::phenotype::{PhenotypeLabel, PhenotypeThresholds};
use crate::config::{positive, EpisodeConfig};
use crate::cusum::{CusumDetector, RegimeShiftConfig};
use crate::episode::{EpisodeStatus, Trajectory};
use crate::error::{Result, SimulationError};
use crate::manifold;

/// Single-step catastrophic transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpEvent {
    /// Step of the record that landed after the jump
    pub step: usize,
    pub time: f64,
    /// Signed displacement x_t - x_{t-1}
    pub delta_x: f64,
}

/// Change of basin flagged by CUSUM on the depth past the separatrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeShift {
    /// Step at which the threshold was crossed
    pub step: usize,
    pub time: f64,
    /// CUSUM value at detection
    pub cusum: f64,
    /// Last step at which the sum was zero
    pub onset_step: usize,
    /// Basin entered: upper (x above the separatrix) or lower
    pub to_upper: bool,
}

/// Post-hoc summary of one completed episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HysteresisMetrics {
    /// Loop area A = |∮ β dE|
    pub area: f64,
    /// ∮ β dE with orientation (positive for a clockwise loop in the (E, β) plane)
    pub signed_area: f64,
    pub jump_events: Vec<JumpEvent>,
    pub regime_shifts: Vec<RegimeShift>,
    pub behavior: BehaviorSummary,
    pub classification: PhenotypeLabel,
}

impl HysteresisMetrics {
    pub fn jump_count(&self) -> usize {
        self.jump_events.len()
    }
}

/// Analysis settings, normally taken from the generating configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HysteresisAnalyzer {
    jump_threshold: f64,
    thresholds: PhenotypeThresholds,
    regime_shift: RegimeShiftConfig,
}

impl HysteresisAnalyzer {
    pub fn new(
        jump_threshold: f64,
        thresholds: PhenotypeThresholds,
        regime_shift: RegimeShiftConfig,
    ) -> Result<Self> {
        positive("jump_threshold", jump_threshold)?;
        thresholds.validate()?;
        regime_shift.validate()?;
        Ok(Self {
            jump_threshold,
            thresholds,
            regime_shift,
        })
    }

    pub fn from_config(config: &EpisodeConfig) -> Result<Self> {
        Self::new(
            config.effective_jump_threshold(),
            config.phenotype_thresholds,
            config.regime_shift,
        )
    }

    pub fn jump_threshold(&self) -> f64 {
        self.jump_threshold
    }

    /// Full metrics for a completed trajectory.
    ///
    /// Fails without computing anything if the trajectory is empty,
    /// has a single record, or did not complete.
    pub fn analyze(&self, trajectory: &Trajectory) -> Result<HysteresisMetrics> {
        ensure_analyzable(trajectory)?;

        let signed_area = trapezoid(trajectory);
        let area = signed_area.abs();
        let jump_events = jumps_above(trajectory, self.jump_threshold);
        let regime_shifts = regime_shifts_with(trajectory, &self.regime_shift);
        let classification = self.thresholds.classify(
            trajectory.omega(),
            area,
            jump_events.len(),
            trajectory.len(),
        );

        Ok(HysteresisMetrics {
            area,
            signed_area,
            jump_events,
            regime_shifts,
            behavior: BehaviorSummary::from_trajectory(trajectory),
            classification,
        })
    }
}

/// Analyze with the thresholds of the trajectory's own configuration
pub fn analyze(trajectory: &Trajectory) -> Result<HysteresisMetrics> {
    HysteresisAnalyzer::from_config(trajectory.config())?.analyze(trajectory)
}

/// Hysteresis area A = |∮ β dE| (trapezoidal rule over successive records)
pub fn loop_area(trajectory: &Trajectory) -> Result<f64> {
    signed_loop_area(trajectory).map(f64::abs)
}

/// ∮ β dE keeping orientation
pub fn signed_loop_area(trajectory: &Trajectory) -> Result<f64> {
    ensure_analyzable(trajectory)?;
    Ok(trapezoid(trajectory))
}

/// Record every step with |x_t - x_{t-1}| > threshold
pub fn detect_jumps(trajectory: &Trajectory, threshold: f64) -> Result<Vec<JumpEvent>> {
    positive("jump_threshold", threshold)?;
    ensure_analyzable(trajectory)?;
    Ok(jumps_above(trajectory, threshold))
}

/// Basin changes found by Page CUSUM; none when Ω ≤ 0
pub fn detect_regime_shifts(
    trajectory: &Trajectory,
    config: &RegimeShiftConfig,
) -> Result<Vec<RegimeShift>> {
    config.validate()?;
    ensure_analyzable(trajectory)?;
    Ok(regime_shifts_with(trajectory, config))
}

fn ensure_analyzable(trajectory: &Trajectory) -> Result<()> {
    if trajectory.is_empty() {
        return Err(SimulationError::InvalidTrajectory("trajectory is empty".into()));
    }
    if trajectory.len() < 2 {
        return Err(SimulationError::InvalidTrajectory(
            "need at least 2 records to integrate a loop".into(),
        ));
    }
    if trajectory.status() != EpisodeStatus::Completed {
        return Err(SimulationError::InvalidTrajectory(format!(
            "episode status is {:?}, expected Completed",
            trajectory.status()
        )));
    }
    Ok(())
}

/// Σ (E_{i+1} - E_i)·(β_{i+1} + β_i)/2
fn trapezoid(trajectory: &Trajectory) -> f64 {
    let drive = trajectory.drive_series();
    let beta = trajectory.beta_series();

    let d_drive = &drive.slice(s![1..]) - &drive.slice(s![..-1]);
    let mid_beta = (&beta.slice(s![1..]) + &beta.slice(s![..-1])) * 0.5;
    (d_drive * mid_beta).sum()
}

/// x_{i+1} - x_i
fn increments(trajectory: &Trajectory) -> Array1<f64> {
    let x = trajectory.state_series();
    &x.slice(s![1..]) - &x.slice(s![..-1])
}

fn jumps_above(trajectory: &Trajectory, threshold: f64) -> Vec<JumpEvent> {
    let records = trajectory.records();
    increments(trajectory)
        .iter()
        .enumerate()
        .filter(|(_, dx)| dx.abs() > threshold)
        .map(|(i, &delta_x)| JumpEvent {
            step: records[i + 1].step,
            time: records[i + 1].time,
            delta_x,
        })
        .collect()
}

/// Monitors how far x has pushed past the separatrix into the other
/// basin, in units of the half-width √Ω. Inside the current basin the
/// statistic is negative; after an event the regime flips and the
/// detector re-arms once x has settled on the new side.
fn regime_shifts_with(trajectory: &Trajectory, config: &RegimeShiftConfig) -> Vec<RegimeShift> {
    let omega = trajectory.omega();
    let records = trajectory.records();
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let Some(mut boundary) = manifold::separatrix(omega, first.drive) else {
        return Vec::new();
    };

    let half_width = omega.sqrt();
    let mut upper = first.x >= boundary;
    let mut detector = CusumDetector::new(0.0, 1.0, config.allowance, config.threshold)
        .with_rearm_steps(config.rearm_steps);

    let mut shifts = Vec::new();
    for record in records {
        boundary = manifold::separatrix(omega, record.drive).unwrap_or(boundary);
        let excursion = (record.x - boundary) / half_width;
        let statistic = if upper { -excursion } else { excursion };

        if let Some(event) = detector.update(statistic) {
            upper = !upper;
            shifts.push(RegimeShift {
                step: record.step,
                time: record.time,
                cusum: event.cusum_value,
                onset_step: records[event.estimated_change_point].step,
                to_upper: upper,
            });
        }
    }
    shifts
}
