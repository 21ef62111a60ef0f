//! Dynamical System Traits: Standardized API for Forced Systems
//!
//! Systems driven through a forcing protocol implement these traits so
//! that episode runners and sweeps can treat them uniformly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DynamicalSystem Trait                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + step(rng)           - Advance system by dt               │
//! │  + run(n, rng)         - Run n steps                        │
//! │  + state()             - Snapshot of the current state      │
//! │  + order_parameter()   - System-specific transition metric  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Randomness is always an explicit argument. Nothing here reaches for a
//! thread-local generator, so a seeded stream reproduces a run exactly.

use rand::Rng;

/// Trait for stochastic dynamical systems advanced step by step
pub trait DynamicalSystem {
    /// State type for this system
    type State;

    /// Advance system by one timestep
    fn step<R: Rng>(&mut self, rng: &mut R);

    /// Run multiple timesteps
    fn run<R: Rng>(&mut self, n_steps: usize, rng: &mut R) {
        for _ in 0..n_steps {
            self.step(rng);
        }
    }

    /// Get current state snapshot
    fn state(&self) -> Self::State;

    /// System-specific order parameter for transition detection
    fn order_parameter(&self) -> f64;
}

/// Trait for systems with controllable parameters
pub trait Controllable {
    /// Parameter type (drive, coupling, current, ...)
    type Parameter;

    /// Set control parameter
    fn set_parameter(&mut self, param: Self::Parameter);

    /// Get current parameter value
    fn get_parameter(&self) -> Self::Parameter;
}

/// Trait for systems exhibiting bifurcations
pub trait Bifurcating: DynamicalSystem + Controllable {
    /// Theoretical critical parameter value (if known)
    fn critical_parameter(&self) -> Option<f64> {
        None
    }

    /// Name of the bifurcation type
    fn bifurcation_type(&self) -> &'static str;
}
