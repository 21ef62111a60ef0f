//! Bandit rewards and the running-average baseline.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use super::decision::Action;
use crate::config::{finite, non_negative};
use crate::error::Result;

/// Two-armed Gaussian bandit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BanditEnvironment {
    /// Mean payoff of the exploit arm
    pub exploit_payoff: f64,
    /// Mean payoff of the explore arm
    pub explore_payoff: f64,
    /// Std of the payoff noise (both arms)
    pub payoff_noise: f64,
}

impl Default for BanditEnvironment {
    fn default() -> Self {
        Self {
            exploit_payoff: 1.0,
            explore_payoff: 0.5,
            payoff_noise: 0.1,
        }
    }
}

impl BanditEnvironment {
    pub fn mean_payoff(&self, action: Action) -> f64 {
        match action {
            Action::Exploit => self.exploit_payoff,
            Action::Explore => self.explore_payoff,
        }
    }

    /// Draw a payoff for `action`.
    ///
    /// Always consumes one normal draw so both arms advance the stream
    /// identically.
    pub fn sample<R: Rng>(&self, action: Action, rng: &mut R) -> f64 {
        let xi: f64 = StandardNormal.sample(rng);
        self.mean_payoff(action) + self.payoff_noise * xi
    }

    pub fn validate(&self) -> Result<()> {
        finite("environment.exploit_payoff", self.exploit_payoff)?;
        finite("environment.explore_payoff", self.explore_payoff)?;
        non_negative("environment.payoff_noise", self.payoff_noise)
    }
}

/// Reward and its prediction error
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSignal {
    pub reward: f64,
    pub prediction_error: f64,
}

/// Exponential moving average of past rewards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RewardBaseline {
    decay: f64,
    expected: f64,
}

impl RewardBaseline {
    /// Baseline starting at zero expectation
    pub fn new(decay: f64) -> Self {
        Self {
            decay,
            expected: 0.0,
        }
    }

    pub fn expected(&self) -> f64 {
        self.expected
    }

    /// PE = reward − expected, then expected ← expected + decay·PE
    pub fn observe(&mut self, reward: f64) -> f64 {
        let prediction_error = reward - self.expected;
        self.expected += self.decay * prediction_error;
        prediction_error
    }
}
