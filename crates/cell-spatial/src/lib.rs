//! `cell-spatial` — spatial neighbor queries for the `rust_cell` framework.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`index`] | `NeighborIndex` (per-step R-tree), `NeighborHit` visitor payload |
//!
//! # Design notes
//!
//! The index is a *snapshot*: the step driver rebuilds it from every cell's
//! position at the start of each step and behaviors query it read-only while
//! they mutate their own cell.  A behavior therefore never observes another
//! cell's partially-updated state — queries always see positions as they were
//! at step start.

pub mod index;

#[cfg(test)]
mod tests;

pub use index::{NeighborHit, NeighborIndex};
