//! CUSUM Module: Sequential Detection of Regime Shifts
//!
//! Under Euler–Maruyama with small dt a catastrophic transition is not
//! a single-step jump: the state leaves the vanished branch and crosses
//! to the other one over many steps. The per-step speed alone cannot
//! tell this apart from a fast sweep dragging x along a single branch,
//! so the monitored statistic is the depth of x past the separatrix
//! into the opposite basin.
//!
//! Page's one-sided CUSUM tests:
//!
//! - H₀: x stays in its current basin (statistic ≤ 0)
//! - H₁: x has moved into the other basin (statistic > 0)
//!
//! The cumulative sum is
//!
//!   C(t) = max(0, C(t-1) + (S(t) - μ₀)/σ₀ - k)
//!
//! where μ₀, σ₀ describe the reference regime and k is the allowance.
//! A shift is declared when C(t) > h. The sum is then held at zero until
//! a run of consecutive observations falls back inside the allowance
//! band, so one transition yields one event.

mod detector;

pub use detector::{
    CusumDetector,
    CusumResult,
    DetectionEvent,
    RegimeShiftConfig,
};
