//! Leave-one-out Gibbs sampling for a motif shared by every sequence of a set.
//!
//! A search runs many independent restarts. Each restart places a random window in
//! every sequence and then repeats Gibbs sweeps, occasionally followed by
//! one-step window shifts and whole-motif length changes, until the best total
//! score plateaus or an iteration cap is hit. A deterministic refinement then snaps
//! every window to its best offset. The restart with the highest total wins, provided
//! it clearly beats the same search run over shuffled copies of the sequences.

pub mod config;
pub mod convergence;
pub mod gibbs;
pub mod moves;
pub mod refine;
pub mod search;
pub mod state;

pub use config::SearchConfig;
pub use convergence::{Convergence, Termination};
pub use moves::LengthMove;
pub use search::{
    find_motif, find_motif_with_cancel, null_threshold, run_restart, starting_motif_len,
    MotifHit, RestartOutcome,
};
pub use state::{BestSolution, BestTracker, Model, MotifState};

#[cfg(test)]
mod tests;
