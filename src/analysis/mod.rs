//! Analysis Module: Hysteresis and Phenotype Readout
//!
//! A completed trajectory traces a curve in the (E, β) plane. When the
//! manifold is bistable the forward and backward sweeps leave the folds
//! at different drives, so the curve encloses an area
//!
//!   A = |∮ β dE|
//!
//! estimated with the trapezoidal rule on successive records. The sign
//! of the unreduced integral gives the loop orientation.
//!
//! Two kinds of transition are reported:
//!
//! - **Jump events**: single steps with |Δx| above a threshold (default
//!   √Ω, half the basin separation). The adiabatic scheme produces these
//!   at every fold crossing.
//! - **Regime shifts**: changes of basin found by CUSUM on how far x
//!   has pushed past the separatrix (the saddle, or past a fold the
//!   point where the saddle vanished). Euler–Maruyama resolves a fold
//!   crossing over many steps, so it shows up here rather than as a
//!   jump. Ω ≤ 0 has a single basin and never shifts.
//!
//! Phenotype labels combine Ω, A and the jump rate:
//!
//! | Signature | Label |
//! |-----------|-------|
//! | switching and hysteretic | Mixed |
//! | Ω < Ω_low, not hysteretic | ADHD_like |
//! | Ω > Ω_high, not switching | ASD_like |
//! | otherwise | Undetermined |

mod hysteresis;
mod phenotype;
mod behavior;

pub use hysteresis::{
    HysteresisAnalyzer,
    HysteresisMetrics,
    JumpEvent,
    RegimeShift,
    analyze,
    detect_jumps,
    detect_regime_shifts,
    loop_area,
    signed_loop_area,
};
pub use phenotype::{PhenotypeLabel, PhenotypeThresholds, classify};
pub use behavior::{BehaviorSummary, shannon_entropy};
