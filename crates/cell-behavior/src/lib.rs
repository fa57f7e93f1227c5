//! `cell-behavior` — the built-in behavior kinds for the `rust_cell`
//! framework.
//!
//! # Crate layout
//!
//! | Module              | Contents                                         |
//! |---------------------|--------------------------------------------------|
//! | [`growth`]          | `Growth` — grow while under a size threshold     |
//! | [`growth_division`] | `GrowthDivision` — grow, then stochastically divide, with an optional heterotypic-neighbor veto |
//! | [`migration`]       | `Migration` — random walk with boundary clamping |
//! | [`secretion`]       | `Secretion` — fixed-rate substance production or uptake |
//!
//! All four implement [`cell_agent::Behavior`]; concrete numeric policy
//! (rates, thresholds, probabilities) is constructor configuration, with
//! defaults matching the reference scenarios.  None of them validates ranges:
//! a probability above 1 always fires, a negative growth rate shrinks.

pub mod growth;
pub mod growth_division;
pub mod migration;
pub mod secretion;

#[cfg(test)]
mod tests;

pub use growth::Growth;
pub use growth_division::GrowthDivision;
pub use migration::Migration;
pub use secretion::Secretion;
