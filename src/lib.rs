//! # TGC-Dynamics
//!
//! Thermostatic Gain Control: Hysteresis and Catastrophic Transitions
//! in an Exploration-Exploitation Decision Loop
//!
//! ## Theoretical Framework
//!
//! An agent's internal gain x lives on a cusp catastrophe manifold
//!
//!   V(x; Ω, E) = x⁴/4 - Ω x²/2 - E x
//!
//! where Ω is a trait-like stability factor and E a state-like drive.
//! For Ω > 0 and |E| < E_crit = √(4Ω³/27) the landscape has two basins.
//! Sweeping E across the fold pair makes x jump between them, and the
//! jump points differ on the way up and on the way down.
//!
//! ### Decision Loop
//!
//! 1. **Manifold**: x relaxes along -∂V/∂x under additive noise
//! 2. **Policy**: x maps to an exploration bias β, which drives a
//!    two-armed bandit and an EMA reward baseline
//! 3. **Forcing**: E follows a scripted up-down ramp or is pushed by
//!    the reward prediction error
//!
//! ## Key Result
//!
//! The area of the (E, β) loop grows with Ω:
//!
//!   A(Ω_high) > A(Ω_low) ≈ 0
//!
//! Shallow manifolds switch freely with little hysteresis (ADHD-like),
//! deep manifolds hold their state until a catastrophic transition
//! (ASD-like).
//!
//! ## References
//!
//! - Thom, "Structural Stability and Morphogenesis" (1972)
//! - Zeeman, "Catastrophe Theory" (1977)
//! - Page, "Continuous Inspection Schemes", Biometrika 41 (1954)

pub mod analysis;
pub mod config;
pub mod cusum;
pub mod episode;
pub mod error;
pub mod forcing;
pub mod manifold;
pub mod policy;
pub mod sweep;
pub mod systems;

// Re-exports from analysis
pub use analysis::{
    HysteresisAnalyzer,
    HysteresisMetrics,
    JumpEvent,
    RegimeShift,
    PhenotypeLabel,
    PhenotypeThresholds,
    BehaviorSummary,
    analyze,
    classify,
    detect_jumps,
    detect_regime_shifts,
    loop_area,
    signed_loop_area,
};

pub use config::EpisodeConfig;

// Re-exports from cusum
pub use cusum::{
    CusumDetector,
    CusumResult,
    DetectionEvent,
    RegimeShiftConfig,
};

// Re-exports from episode
pub use episode::{
    Episode,
    EpisodeStatus,
    Trajectory,
    TrajectoryRecord,
    run_episode,
};

pub use error::{DegenerateManifoldWarning, Result, SimulationError};

pub use forcing::{ForcingMode, ForcingProtocol, triangular_ramp};

pub use policy::{
    Action,
    ActionDistribution,
    BanditEnvironment,
    DecisionPolicy,
    RewardBaseline,
    RewardSignal,
};

pub use sweep::{SweepPoint, SweepSummary, omega_sweep};

// Re-exports from systems
pub use systems::{
    // Traits
    DynamicalSystem,
    Controllable,
    Bifurcating,
    // Cusp agent
    CuspAgent,
    CuspState,
    InitialBranch,
    // Integration
    IntegrationScheme,
    StateIntegrator,
};
