//! Demo runners.

pub mod qaoa;
pub mod time_evolution;

pub use qaoa::{QaoaRunResult, QaoaRunner};
pub use time_evolution::{TimeEvolutionResult, TimeEvolutionRunner};
