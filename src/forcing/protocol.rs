//! Drive schedules for one episode.

use serde::{Deserialize, Serialize};

use crate::config::EpisodeConfig;

/// How the drive is produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForcingMode {
    /// Pre-computed triangular ramp
    #[default]
    Scripted,
    /// Drive updated from reward prediction errors
    MdpCoupled,
}

/// One point of a scripted schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrivePoint {
    pub step: usize,
    pub drive: f64,
}

/// Triangular ramp E_min → E_max → E_min of length `n_steps`.
///
/// The ascending half has ⌈n/2⌉ points and the descending half ⌊n/2⌋;
/// both include their endpoints, so the apex value appears twice.
pub fn triangular_ramp(e_min: f64, e_max: f64, n_steps: usize) -> Vec<DrivePoint> {
    let n_up = (n_steps + 1) / 2;
    let n_down = n_steps / 2;

    linspace(e_min, e_max, n_up)
        .chain(linspace(e_max, e_min, n_down))
        .enumerate()
        .map(|(step, drive)| DrivePoint { step, drive })
        .collect()
}

fn linspace(start: f64, end: f64, n: usize) -> impl Iterator<Item = f64> {
    let span = end - start;
    (0..n).map(move |i| {
        if n == 1 {
            start
        } else {
            start + span * i as f64 / (n - 1) as f64
        }
    })
}

/// Drive generator for one episode
#[derive(Debug, Clone, PartialEq)]
pub enum ForcingProtocol {
    Scripted {
        schedule: Vec<f64>,
    },
    MdpCoupled {
        drive: f64,
        learning_rate: f64,
        e_min: f64,
        e_max: f64,
    },
}

impl ForcingProtocol {
    pub fn scripted(e_min: f64, e_max: f64, n_steps: usize) -> Self {
        let schedule = triangular_ramp(e_min, e_max, n_steps)
            .into_iter()
            .map(|p| p.drive)
            .collect();
        ForcingProtocol::Scripted { schedule }
    }

    /// Reward-coupled drive starting at E_min
    pub fn mdp_coupled(e_min: f64, e_max: f64, learning_rate: f64) -> Self {
        ForcingProtocol::MdpCoupled {
            drive: e_min,
            learning_rate,
            e_min,
            e_max,
        }
    }

    pub fn from_config(config: &EpisodeConfig) -> Self {
        match config.forcing_mode {
            ForcingMode::Scripted => Self::scripted(config.e_min, config.e_max, config.n_steps),
            ForcingMode::MdpCoupled => {
                Self::mdp_coupled(config.e_min, config.e_max, config.reward_learning_rate)
            }
        }
    }

    pub fn mode(&self) -> ForcingMode {
        match self {
            ForcingProtocol::Scripted { .. } => ForcingMode::Scripted,
            ForcingProtocol::MdpCoupled { .. } => ForcingMode::MdpCoupled,
        }
    }

    /// Drive to apply at `step`.
    ///
    /// A scripted schedule holds its last value past the end.
    pub fn drive(&self, step: usize) -> f64 {
        match self {
            ForcingProtocol::Scripted { schedule } => match schedule.get(step) {
                Some(&e) => e,
                None => schedule.last().copied().unwrap_or(0.0),
            },
            ForcingProtocol::MdpCoupled { drive, .. } => *drive,
        }
    }

    /// Feed this step's prediction error back into the drive.
    ///
    /// No-op for scripted forcing.
    pub fn feedback(&mut self, prediction_error: f64) {
        if let ForcingProtocol::MdpCoupled {
            drive,
            learning_rate,
            e_min,
            e_max,
        } = self
        {
            *drive = (*drive + *learning_rate * prediction_error).clamp(*e_min, *e_max);
        }
    }
}
