//! Episode Module: Closing the Loop Between Manifold and MDP
//!
//! The feedback cycle E → x → β → action → reward → PE → E is unrolled
//! into a strictly sequential step loop. State is threaded explicitly
//! through the runner; there is no shared mutable state between
//! episodes, so independent episodes can run on separate threads.
//!
//! The output is a `Trajectory`: an append-only record of
//! (t, Ω, E, x, β, action, reward) that becomes immutable once the
//! episode reaches a terminal state.

mod trajectory;
mod runner;

pub use trajectory::{EpisodeStatus, Trajectory, TrajectoryRecord};
pub use runner::{Episode, run_episode, DEGENERATE_SEPARATION};
