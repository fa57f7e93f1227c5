//! `cell-core` — foundational types for the `rust_cell` agent simulation
//! framework.
//!
//! This crate is a dependency of every other `cell-*` crate.  It intentionally
//! has no `cell-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `CellUid`, `SubstanceId`                              |
//! | [`real3`]  | `Real3` 3-vector, squared distance                    |
//! | [`time`]   | `Step`, `SimClock`                                    |
//! | [`param`]  | `Param` — domain bounds, time step, seed, run length  |
//! | [`rng`]    | `SimRng` — deterministic uniform draws                |
//! | [`error`]  | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.    |

pub mod error;
pub mod ids;
pub mod param;
pub mod real3;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{CellUid, SubstanceId};
pub use param::Param;
pub use real3::Real3;
pub use rng::SimRng;
pub use time::{SimClock, Step};
