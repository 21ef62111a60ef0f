//! Action readout from the order parameter.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::reward::{BanditEnvironment, RewardBaseline, RewardSignal};

/// Equilibrium spans at or below this are treated as collapsed
const COLLAPSE_TOLERANCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Exploit,
    Explore,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Exploit => write!(f, "exploit"),
            Action::Explore => write!(f, "explore"),
        }
    }
}

/// Probabilities over {exploit, explore}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionDistribution {
    pub exploit: f64,
    pub explore: f64,
}

impl ActionDistribution {
    /// 0.5 / 0.5
    pub fn neutral() -> Self {
        Self {
            exploit: 0.5,
            explore: 0.5,
        }
    }

    /// Distribution with exploration bias β
    pub fn from_beta(beta: f64) -> Self {
        Self {
            exploit: 1.0 - beta,
            explore: beta,
        }
    }

    /// Exploration bias β (probability of exploring)
    pub fn beta(&self) -> f64 {
        self.explore
    }

    pub fn probability(&self, action: Action) -> f64 {
        match action {
            Action::Exploit => self.exploit,
            Action::Explore => self.explore,
        }
    }
}

/// Maps order state to actions and turns outcomes into prediction errors
#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    link_gain: f64,
    baseline: RewardBaseline,
}

impl DecisionPolicy {
    /// Policy with logistic gain `link_gain` and EMA decay `baseline_decay`
    pub fn new(link_gain: f64, baseline_decay: f64) -> Self {
        Self {
            link_gain,
            baseline: RewardBaseline::new(baseline_decay),
        }
    }

    /// β from the position of `x` within [x_low, x_high].
    ///
    /// A collapsed span (monostable region) yields the neutral
    /// distribution instead of dividing by zero. Positions outside the
    /// span are allowed; the logistic keeps β in (0, 1).
    pub fn action_distribution(
        &self,
        x: f64,
        x_low_bound: f64,
        x_high_bound: f64,
    ) -> ActionDistribution {
        let low = x_low_bound.min(x_high_bound);
        let high = x_low_bound.max(x_high_bound);
        let span = high - low;
        if !(span > COLLAPSE_TOLERANCE) {
            return ActionDistribution::neutral();
        }

        let u = (x - low) / span;
        ActionDistribution::from_beta(logistic(self.link_gain * (2.0 * u - 1.0)))
    }

    /// Categorical draw; consumes one uniform sample
    pub fn select_action<R: Rng>(&self, distribution: &ActionDistribution, rng: &mut R) -> Action {
        let u: f64 = rng.random();
        if u < distribution.explore {
            Action::Explore
        } else {
            Action::Exploit
        }
    }

    /// Sample a reward for `action` and update the baseline
    pub fn reward<R: Rng>(
        &mut self,
        action: Action,
        environment: &BanditEnvironment,
        rng: &mut R,
    ) -> RewardSignal {
        let reward = environment.sample(action, rng);
        let prediction_error = self.baseline.observe(reward);
        RewardSignal {
            reward,
            prediction_error,
        }
    }

    /// Current baseline expectation
    pub fn expected_reward(&self) -> f64 {
        self.baseline.expected()
    }
}

fn logistic(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
