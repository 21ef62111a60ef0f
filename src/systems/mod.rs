//! Systems Module: The Forced Order Parameter
//!
//! - **traits**: `DynamicalSystem` / `Controllable` / `Bifurcating`
//! - **integrator**: Euler–Maruyama and adiabatic update rules
//! - **cusp_agent**: the order parameter x on the cusp surface
//!
//! The episode runner owns one `CuspAgent` per run and drives it
//! through the forcing protocol.

mod traits;
mod integrator;
mod cusp_agent;

pub use traits::{DynamicalSystem, Controllable, Bifurcating};
pub use integrator::{
    IntegrationScheme,
    StateIntegrator,
    euler_maruyama_step,
    adiabatic_step,
};
pub use cusp_agent::{CuspAgent, CuspState, InitialBranch};
