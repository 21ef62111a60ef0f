//! Cusp Agent: A Forced Order Parameter on the Catastrophe Surface
//!
//! Wraps the scalar state x together with its controls (Ω, E) and the
//! integrator that moves it:
//!
//!   dx/dt = −(x³ − Ωx − E) + noise
//!
//! ## Fold Bifurcation
//!
//! For Ω > 0 the surface folds over the band |E| < E_crit = √(4Ω³/27):
//! - Inside the band: two stable branches, the state keeps whichever
//!   it is on (memory)
//! - Crossing ±E_crit: the occupied branch vanishes and the state falls
//!   onto the other one (catastrophe)
//!
//! Low Ω gives a narrow band with shallow basins, high Ω a wide band
//! with deep basins and large hysteresis.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::integrator::StateIntegrator;
use super::traits::{Bifurcating, Controllable, DynamicalSystem};
use crate::manifold;

/// Where the state starts at the initial drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialBranch {
    /// Lowest-potential stable equilibrium
    #[default]
    GlobalMinimum,
    /// Smallest stable equilibrium
    Lower,
    /// Largest stable equilibrium
    Upper,
}

/// Snapshot of the agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuspState {
    /// Order parameter x
    pub x: f64,
    /// Stability factor Ω
    pub omega: f64,
    /// Input drive E
    pub drive: f64,
    /// Simulation time
    pub time: f64,
    /// Three equilibria at the current controls?
    pub bistable: bool,
    /// V(x) at the current controls
    pub potential: f64,
}

/// Order parameter evolving on the cusp surface
#[derive(Debug, Clone)]
pub struct CuspAgent {
    /// Stability factor (fixed)
    omega: f64,
    /// Input drive (control parameter)
    drive: f64,
    /// Order parameter
    x: f64,
    /// Current time
    time: f64,
    integrator: StateIntegrator,
}

impl CuspAgent {
    /// Create an agent resting on `branch` at drive `drive`
    pub fn new(omega: f64, drive: f64, integrator: StateIntegrator, branch: InitialBranch) -> Self {
        let x = match branch {
            InitialBranch::GlobalMinimum => manifold::global_minimum(omega, drive),
            InitialBranch::Lower | InitialBranch::Upper => {
                let mut stable = manifold::stable_equilibria(omega, drive);
                if stable.is_empty() {
                    stable = manifold::equilibria(omega, drive);
                }
                if branch == InitialBranch::Lower {
                    stable[0]
                } else {
                    stable[stable.len() - 1]
                }
            }
        };

        Self {
            omega,
            drive,
            x,
            time: 0.0,
            integrator,
        }
    }

    /// Current order parameter x
    pub fn position(&self) -> f64 {
        self.x
    }

    pub fn omega(&self) -> f64 {
        self.omega
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Equilibria at the current controls, ascending
    pub fn equilibria(&self) -> Vec<f64> {
        manifold::equilibria(self.omega, self.drive)
    }

    pub fn is_bistable(&self) -> bool {
        manifold::is_bistable(self.omega, self.drive)
    }

    /// Restart the clock (after warm-up)
    pub fn reset_time(&mut self) {
        self.time = 0.0;
    }
}

impl DynamicalSystem for CuspAgent {
    type State = CuspState;

    fn step<R: Rng>(&mut self, rng: &mut R) {
        self.x = self.integrator.step(self.x, self.omega, self.drive, rng);
        self.time += self.integrator.dt();
    }

    fn state(&self) -> CuspState {
        CuspState {
            x: self.x,
            omega: self.omega,
            drive: self.drive,
            time: self.time,
            bistable: self.is_bistable(),
            potential: manifold::potential(self.x, self.omega, self.drive),
        }
    }

    fn order_parameter(&self) -> f64 {
        self.x
    }
}

impl Controllable for CuspAgent {
    type Parameter = f64;

    fn set_parameter(&mut self, param: f64) {
        self.drive = param;
    }

    fn get_parameter(&self) -> f64 {
        self.drive
    }
}

impl Bifurcating for CuspAgent {
    fn critical_parameter(&self) -> Option<f64> {
        manifold::critical_drive(self.omega)
    }

    fn bifurcation_type(&self) -> &'static str {
        "cusp (fold pair)"
    }
}
