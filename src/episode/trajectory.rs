//! Behavioral trace of one episode.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::config::EpisodeConfig;
use crate::error::DegenerateManifoldWarning;
use crate::policy::Action;

/// Lifecycle of an episode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeStatus {
    Initialized,
    Running,
    Completed,
    /// Aborted on a non-finite state; records stop before the failure
    Failed,
}

impl EpisodeStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EpisodeStatus::Completed | EpisodeStatus::Failed)
    }
}

/// One simulation step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryRecord {
    /// Step index
    pub step: usize,
    /// Simulation time at the end of the step ((step + 1)·dt)
    pub time: f64,
    /// Stability factor Ω
    pub omega: f64,
    /// Drive E applied this step
    pub drive: f64,
    /// Order parameter after the step
    pub x: f64,
    /// Exploration bias
    pub beta: f64,
    pub action: Action,
    pub reward: f64,
    pub prediction_error: f64,
}

/// Time-ordered, append-only trace of an episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    config: EpisodeConfig,
    status: EpisodeStatus,
    records: Vec<TrajectoryRecord>,
    warnings: Vec<DegenerateManifoldWarning>,
}

impl Trajectory {
    pub(crate) fn new(config: EpisodeConfig) -> Self {
        let capacity = config.n_steps;
        Self {
            config,
            status: EpisodeStatus::Initialized,
            records: Vec::with_capacity(capacity),
            warnings: Vec::new(),
        }
    }

    /// Completed trajectory assembled from existing records
    /// (synthetic traces, reloaded runs)
    pub fn from_records(config: EpisodeConfig, records: Vec<TrajectoryRecord>) -> Self {
        Self {
            config,
            status: EpisodeStatus::Completed,
            records,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, record: TrajectoryRecord) {
        debug_assert!(!self.status.is_terminal());
        self.records.push(record);
    }

    pub(crate) fn warn(&mut self, warning: DegenerateManifoldWarning) {
        self.warnings.push(warning);
    }

    pub(crate) fn set_status(&mut self, status: EpisodeStatus) {
        self.status = status;
    }

    /// Configuration that produced this trajectory
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    pub fn omega(&self) -> f64 {
        self.config.omega
    }

    pub fn status(&self) -> EpisodeStatus {
        self.status
    }

    pub fn records(&self) -> &[TrajectoryRecord] {
        &self.records
    }

    pub fn warnings(&self) -> &[DegenerateManifoldWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drive column E(t)
    pub fn drive_series(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.drive).collect()
    }

    /// Order parameter column x(t)
    pub fn state_series(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.x).collect()
    }

    /// Exploration bias column β(t)
    pub fn beta_series(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.beta).collect()
    }

    pub fn reward_series(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.reward).collect()
    }

    pub fn actions(&self) -> impl Iterator<Item = Action> + '_ {
        self.records.iter().map(|r| r.action)
    }
}
