//! `cell-field` — extracellular substance fields for the `rust_cell`
//! framework.
//!
//! # Crate layout
//!
//! | Module   | Contents                                                  |
//! |----------|-----------------------------------------------------------|
//! | [`grid`] | `SubstanceGrid` — named 3-D scalar lattices, decay sweep  |
//! | [`rate`] | `RateBuffer` — per-step commutative rate accumulation     |
//!
//! # Design notes
//!
//! Secretion/uptake behaviors never write the lattice directly.  They record
//! `(substance, position, rate)` adjustments into a [`RateBuffer`] during the
//! step; the driver flushes the buffer into the grid once all behaviors have
//! run.  Because flushing is pure addition, N adjustments to the same voxel
//! yield the same accumulated effect in any order.
//!
//! Diffusion numerics are deliberately absent: the grid stores, accumulates,
//! and decays concentrations.  A PDE solver, if ever needed, would be a
//! separate collaborator that reads and rewrites the lattice between steps.

pub mod error;
pub mod grid;
pub mod rate;

#[cfg(test)]
mod tests;

pub use error::{FieldError, FieldResult};
pub use grid::SubstanceGrid;
pub use rate::RateBuffer;
