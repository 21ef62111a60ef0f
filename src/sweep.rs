//! Ω sweeps: one independent episode per stability factor.
//!
//! Episodes share nothing mutable. Point `i` runs with seed
//! `base.seed + i`, so a sweep is reproducible whether or not it runs
//! on rayon's pool, and results come back in input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::{analyze, HysteresisMetrics};
use crate::config::EpisodeConfig;
use crate::episode::run_episode;
use crate::error::Result;

/// Outcome of one sweep point
#[derive(Debug)]
pub struct SweepPoint {
    pub omega: f64,
    pub seed: u64,
    pub outcome: Result<HysteresisMetrics>,
}

/// Serializable view of a successful point
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary<'a> {
    pub omega: f64,
    pub seed: u64,
    pub metrics: &'a HysteresisMetrics,
}

impl SweepPoint {
    pub fn metrics(&self) -> Option<&HysteresisMetrics> {
        self.outcome.as_ref().ok()
    }

    pub fn summary(&self) -> Option<SweepSummary<'_>> {
        self.metrics().map(|metrics| SweepSummary {
            omega: self.omega,
            seed: self.seed,
            metrics,
        })
    }
}

/// Run `base` once per Ω and analyze each trajectory
pub fn omega_sweep(base: &EpisodeConfig, omegas: &[f64]) -> Vec<SweepPoint> {
    #[cfg(feature = "parallel")]
    let points = omegas
        .par_iter()
        .enumerate()
        .map(|(i, &omega)| sweep_point(base, i, omega))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let points = omegas
        .iter()
        .enumerate()
        .map(|(i, &omega)| sweep_point(base, i, omega))
        .collect();

    points
}

fn sweep_point(base: &EpisodeConfig, index: usize, omega: f64) -> SweepPoint {
    let seed = base.seed.wrapping_add(index as u64);
    let config = base.clone().with_omega(omega).with_seed(seed);
    let outcome = run_episode(config).and_then(|trajectory| analyze(&trajectory));

    match &outcome {
        Ok(metrics) => info!(
            omega,
            seed,
            area = metrics.area,
            jumps = metrics.jump_count(),
            label = %metrics.classification,
            "sweep point done"
        ),
        Err(e) => warn!(omega, seed, error = %e, "sweep point failed"),
    }

    SweepPoint { omega, seed, outcome }
}
