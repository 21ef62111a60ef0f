//! Forcing Module: The Catastrophe-Forcing Protocol (CFP)
//!
//! Produces the drive E(t) applied to the agent at each step. Two modes
//! share one contract ("give me this step's E, then take feedback"):
//!
//! - **Scripted**: a triangular stress ramp E_min → E_max → E_min that
//!   crosses both folds when |E_crit| lies inside the range, tracing the
//!   full hysteresis loop
//! - **MDP-coupled**: E follows the reward prediction error,
//!
//!   E_{t+1} = clip(E_t + η·PE_t, E_min, E_max)
//!
//! The mode is picked from configuration at episode start.

mod protocol;

pub use protocol::{ForcingMode, ForcingProtocol, DrivePoint, triangular_ramp};
