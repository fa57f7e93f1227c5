//! Cell-creation events — the propagation protocol's carrier value.

use crate::behavior::Behavior;
use crate::cell::Cell;

/// Why a new cell (or a behavior unit on it) is being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCause {
    /// The new cell is the daughter of a dividing cell.
    CellDivision,
    /// Explicit scenario-setup seeding.
    Seed,
    /// Any other application-defined creation path.
    Other,
}

/// Ephemeral description of a cell-creation event.
///
/// Passed to [`Behavior::initialize`][crate::Behavior::initialize] for every
/// unit exactly once.  When `origin` is present the caller guarantees it is
/// of the same concrete kind as the unit being initialized — the
/// initialization must copy its parameters as a point-in-time snapshot, never
/// keep the reference.
pub struct NewAgentEvent<'a> {
    pub cause: EventCause,
    /// The originating cell (the mother for a division); absent for pure
    /// seeding.
    pub mother: Option<&'a Cell>,
    /// The originating behavior unit driving this unit's initialization;
    /// absent on the setup path.
    pub origin: Option<&'a dyn Behavior>,
}

impl<'a> NewAgentEvent<'a> {
    /// Setup-path event: no originating cell or behavior.
    pub fn seed() -> Self {
        Self { cause: EventCause::Seed, mother: None, origin: None }
    }

    /// Propagation-path event for a division.
    pub fn division(mother: Option<&'a Cell>, origin: &'a dyn Behavior) -> Self {
        Self { cause: EventCause::CellDivision, mother, origin: Some(origin) }
    }
}
