//! State Integrator: Stochastic Relaxation on the Cusp Surface
//!
//! The default scheme is Euler–Maruyama on the overdamped Langevin
//! equation dx = −V'(x)·dt + σ·dW:
//!
//!   x_{n+1} = x_n + force(x_n)·dt + σ·√dt·ξ_n,   ξ_n ~ N(0, 1)
//!
//! The explicit drift step is only faithful while |force·dt| stays small
//! against the basin width (~√Ω). An oversized dt near the fold lets the
//! state overshoot the saddle in one step, producing spurious jumps that
//! the hysteresis analysis would count as catastrophes. Keep dt ≲ 1e-2
//! for |E| of order a few.
//!
//! The adiabatic scheme is the quasi-static limit: the state snaps to
//! the stable equilibrium nearest to where it was (minimum-distance
//! selection). It has no noise and consumes no random draws, and it
//! makes fold crossings single-step jumps.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use serde::{Deserialize, Serialize};

use crate::manifold;

/// Update rule for the order parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationScheme {
    /// Overdamped Langevin, Euler–Maruyama
    #[default]
    EulerMaruyama,
    /// Minimum-distance stable equilibrium (quasi-static limit)
    Adiabatic,
}

/// One Euler–Maruyama step.
///
/// Always draws exactly one standard normal, even when `noise_std` is
/// zero, so the stream position is independent of the noise level.
pub fn euler_maruyama_step<R: Rng>(
    x: f64,
    omega: f64,
    drive: f64,
    dt: f64,
    noise_std: f64,
    rng: &mut R,
) -> f64 {
    let xi: f64 = StandardNormal.sample(rng);
    x + manifold::force(x, omega, drive) * dt + noise_std * dt.sqrt() * xi
}

/// Quasi-static step: nearest stable equilibrium to `x`.
///
/// Falls back to the nearest equilibrium of any kind when none is
/// strictly stable (the degenerate cusp point Ω = 0, E = 0).
pub fn adiabatic_step(x: f64, omega: f64, drive: f64) -> f64 {
    let mut candidates = manifold::stable_equilibria(omega, drive);
    if candidates.is_empty() {
        candidates = manifold::equilibria(omega, drive);
    }

    candidates
        .into_iter()
        .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()))
        .unwrap_or(x)
}

/// Integrator settings bundled for repeated stepping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateIntegrator {
    scheme: IntegrationScheme,
    dt: f64,
    noise_std: f64,
}

impl StateIntegrator {
    /// Euler–Maruyama integrator with timestep `dt` and noise `noise_std`
    pub fn new(dt: f64, noise_std: f64) -> Self {
        Self {
            scheme: IntegrationScheme::EulerMaruyama,
            dt,
            noise_std,
        }
    }

    pub fn with_scheme(mut self, scheme: IntegrationScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn scheme(&self) -> IntegrationScheme {
        self.scheme
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn noise_std(&self) -> f64 {
        self.noise_std
    }

    /// Advance `x` one timestep under controls (Ω, E)
    pub fn step<R: Rng>(&self, x: f64, omega: f64, drive: f64, rng: &mut R) -> f64 {
        match self.scheme {
            IntegrationScheme::EulerMaruyama => {
                euler_maruyama_step(x, omega, drive, self.dt, self.noise_std, rng)
            }
            IntegrationScheme::Adiabatic => adiabatic_step(x, omega, drive),
        }
    }
}
