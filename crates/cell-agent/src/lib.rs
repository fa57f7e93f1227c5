//! `cell-agent` — cell state, the behavior attachment contract, and the cell
//! registry for the `rust_cell` framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`cell`]     | `Cell` — position, diameter↔volume, density, phenotype, behavior slots |
//! | [`behavior`] | `Behavior` trait, `BehaviorKind`, `PropagationPolicy`, `RunControl` |
//! | [`event`]    | `NewAgentEvent`, `EventCause` — the creation/propagation protocol |
//! | [`ctx`]      | `StepCtx` — the capability bundle passed into every `run`, incl. division |
//! | [`store`]    | `CellStore` — uid-stable registry with deferred births          |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! A behavior unit belongs to exactly one cell and holds only its own
//! parameters.  During a step the driver temporarily *takes* the unit out of
//! its slot, so `run` receives `&mut Cell` for the owning cell without
//! aliasing the unit itself.  Everything else a behavior may touch — RNG,
//! neighbor index, substance rates, pending births — arrives through
//! [`StepCtx`]; there is no ambient global simulation state.

pub mod behavior;
pub mod cell;
pub mod ctx;
pub mod error;
pub mod event;
pub mod store;


pub use behavior::{Behavior, BehaviorKind, PropagationPolicy, RunControl, origin_as};
pub use cell::Cell;
pub use ctx::{StepCtx, clamp_to_interior, interior_bounds};
pub use error::{BehaviorError, BehaviorResult};
pub use event::{EventCause, NewAgentEvent};
pub use store::CellStore;
