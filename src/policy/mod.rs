//! Policy Module: Bridging the Manifold to an Exploration-Exploitation MDP
//!
//! The continuous order parameter x is read out as an exploration bias
//!
//!   u = (x − x_low) / (x_high − x_low)
//!   β = σ(g·(2u − 1)),   σ(z) = 1 / (1 + e^(−z))
//!
//! where [x_low, x_high] are the outermost equilibria at the current
//! controls and g is the link gain. β is the probability of exploring;
//! 1 − β the probability of exploiting. When the equilibria collapse to
//! a single point the readout is neutral (β = 0.5).
//!
//! Rewards come from a two-armed bandit. The prediction error against an
//! exponential moving-average baseline is the feedback that perturbs E
//! in MDP-coupled forcing.

mod decision;
mod reward;

pub use decision::{Action, ActionDistribution, DecisionPolicy};
pub use reward::{BanditEnvironment, RewardBaseline, RewardSignal};
