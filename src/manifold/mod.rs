//! Manifold Module: The Cusp Catastrophe Potential
//!
//! The internal order parameter x lives on the standard cusp surface
//!
//!   V(x) = x⁴/4 − Ω·x²/2 − E·x
//!
//! with two control parameters:
//! - Ω: stability factor (basin depth, fixed per run)
//! - E: input drive (asymmetry, swept or fed back)
//!
//! ## Equilibria
//!
//! Critical points solve x³ − Ωx − E = 0. With the discriminant
//!
//!   Δ = (E/2)² − (Ω/3)³
//!
//! - Δ > 0: one real root (monostable)
//! - Δ ≤ 0: three real roots (two minima separated by a saddle)
//!
//! ## Bifurcation Set
//!
//! The fold lines where a minimum annihilates with the saddle are
//!
//!   E_crit = ±√(4Ω³/27)
//!
//! Crossing them forces a discontinuous jump of x onto the surviving
//! branch. Sweeping E back and forth across both folds traces the
//! hysteresis loop. For Ω ≤ 0 the surface has no fold and every drive
//! is monostable.

mod cusp;

pub use cusp::{
    basin_separation,
    bifurcation_set,
    critical_drive,
    discriminant,
    equilibria,
    force,
    force_derivative,
    global_minimum,
    is_bistable,
    potential,
    separatrix,
    stable_equilibria,
};
