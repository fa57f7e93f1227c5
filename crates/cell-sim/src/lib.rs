//! `cell-sim` — step loop orchestrator for the rust_cell framework.
//!
//! # The step loop
//!
//! ```text
//! for step in 0..param.total_steps:
//!   ① Index    — rebuild the neighbor index from all registered cells.
//!   ② Snapshot — record the (cell, slot) pairs attached right now.
//!   ③ Run      — for each snapshotted pair, take the unit out of its
//!                slot, call Behavior::run, then restore or discard it.
//!                Units attached mid-step are not in the snapshot and
//!                first run next step.
//!   ④ Register — move pending daughters into the registry (they are
//!                first visited next step).
//!   ⑤ Field    — flush buffered rate adjustments into the substance
//!                lattices, then apply first-order decay.
//!   ⑥ Compact  — physically erase tombstoned behavior slots.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs substance decay on Rayon's thread pool.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cell_behavior::GrowthDivision;
//! use cell_core::Param;
//! use cell_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(Param::default())
//!     .cells(cells)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod seed;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Simulation;
