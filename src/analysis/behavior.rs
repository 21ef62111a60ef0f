//! Behavioral Summary: What the Agent Actually Did
//!
//! Aggregates over the action stream of a trajectory. The action
//! entropy is the Shannon entropy of the empirical action frequencies
//!
//!   H = -Σₐ pₐ ln pₐ
//!
//! in nats, so it lies in [0, ln 2] for the two-armed bandit.

use serde::{Deserialize, Serialize};

use crate::episode::Trajectory;
use crate::policy::Action;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSummary {
    /// Fraction of steps spent exploring
    pub explore_fraction: f64,
    /// Fraction of consecutive steps whose action differs
    pub switch_rate: f64,
    pub mean_beta: f64,
    pub mean_reward: f64,
    /// Shannon entropy of action frequencies (nats)
    pub action_entropy: f64,
}

impl BehaviorSummary {
    /// Summarise a trajectory; all fields are zero when it is empty
    pub fn from_trajectory(trajectory: &Trajectory) -> Self {
        let records = trajectory.records();
        if records.is_empty() {
            return Self {
                explore_fraction: 0.0,
                switch_rate: 0.0,
                mean_beta: 0.0,
                mean_reward: 0.0,
                action_entropy: 0.0,
            };
        }

        let n = records.len() as f64;
        let explores = trajectory
            .actions()
            .filter(|a| *a == Action::Explore)
            .count() as f64;
        let switches = records
            .windows(2)
            .filter(|w| w[0].action != w[1].action)
            .count() as f64;

        let explore_fraction = explores / n;

        Self {
            explore_fraction,
            switch_rate: switches / (n - 1.0).max(1.0),
            mean_beta: trajectory.beta_series().mean().unwrap_or(0.0),
            mean_reward: trajectory.reward_series().mean().unwrap_or(0.0),
            action_entropy: shannon_entropy(&[explore_fraction, 1.0 - explore_fraction]),
        }
    }
}

/// H = -Σ pᵢ ln pᵢ over the non-zero probabilities
pub fn shannon_entropy(probabilities: &[f64]) -> f64 {
    let mut entropy = 0.0;
    for &p in probabilities {
        if p > 0.0 {
            entropy -= p * p.ln();
        }
    }
    entropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EpisodeConfig;
    use crate::episode::TrajectoryRecord;

    fn record(step: usize, action: Action, beta: f64, reward: f64) -> TrajectoryRecord {
        TrajectoryRecord {
            step,
            time: (step + 1) as f64 * 0.01,
            omega: 1.0,
            drive: 0.0,
            x: 0.0,
            beta,
            action,
            reward,
            prediction_error: 0.0,
        }
    }

    #[test]
    fn test_alternating_actions() {
        let records = vec![
            record(0, Action::Exploit, 0.2, 1.0),
            record(1, Action::Explore, 0.8, 0.5),
            record(2, Action::Exploit, 0.2, 1.0),
            record(3, Action::Explore, 0.8, 0.5),
        ];
        let trajectory = Trajectory::from_records(EpisodeConfig::default(), records);
        let summary = BehaviorSummary::from_trajectory(&trajectory);

        assert_eq!(summary.explore_fraction, 0.5);
        assert_eq!(summary.switch_rate, 1.0);
        assert!((summary.mean_beta - 0.5).abs() < 1e-12);
        assert!((summary.mean_reward - 0.75).abs() < 1e-12);
        assert!((summary.action_entropy - 2f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_action_has_zero_entropy() {
        let records = (0..5).map(|i| record(i, Action::Exploit, 0.1, 1.0)).collect();
        let trajectory = Trajectory::from_records(EpisodeConfig::default(), records);
        let summary = BehaviorSummary::from_trajectory(&trajectory);

        assert_eq!(summary.explore_fraction, 0.0);
        assert_eq!(summary.switch_rate, 0.0);
        assert_eq!(summary.action_entropy, 0.0);
    }

    #[test]
    fn test_empty_trajectory() {
        let summary = BehaviorSummary::from_trajectory(&Trajectory::from_records(
            EpisodeConfig::default(),
            Vec::new(),
        ));
        assert_eq!(summary.mean_beta, 0.0);
    }
}
