//! The `Cell` — one simulated biological unit.

use cell_core::{CellUid, Real3};

use crate::behavior::{Behavior, BehaviorKind};
use crate::error::BehaviorResult;
use crate::event::{EventCause, NewAgentEvent};

/// Volume of a sphere of diameter `d` is `VOLUME_COEFF * d³`.
const VOLUME_COEFF: f64 = std::f64::consts::PI / 6.0;

/// Volume floor — the volume of a 0.01-diameter sphere.  Negative growth
/// rates shrink a cell down to this floor but never through it.
const MIN_VOLUME: f64 = VOLUME_COEFF * 1e-6;

// ── Behavior slot ─────────────────────────────────────────────────────────────

/// One entry in a cell's ordered behavior sequence.
///
/// The `unit` is `None` transiently while the driver runs it (taken out of
/// the slot) and permanently once `removed` is set.  Tombstoned slots are
/// skipped until the driver compacts them at step end, so slot indices stay
/// stable for the duration of a step.
pub(crate) struct BehaviorSlot {
    pub(crate) unit: Option<Box<dyn Behavior>>,
    pub(crate) removed: bool,
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One simulated cell: scalar physical state plus an ordered sequence of
/// attached behavior units.
///
/// Diameter and volume are two views of the same spherical size and are kept
/// consistent by every mutator; density maps volume to mass.  The uid is
/// assigned by [`CellStore`][crate::CellStore] at registration and equals the
/// cell's registry index.
pub struct Cell {
    uid: CellUid,
    position: Real3,
    diameter: f64,
    volume: f64,
    density: f64,
    phenotype: i32,
    behaviors: Vec<BehaviorSlot>,
}

impl Cell {
    /// A cell with the reference defaults: diameter 10, density 1,
    /// phenotype 1, positioned at the origin, no behaviors.
    pub fn new() -> Self {
        let diameter = 10.0;
        Self {
            uid: CellUid::INVALID,
            position: Real3::ZERO,
            diameter,
            volume: VOLUME_COEFF * diameter.powi(3),
            density: 1.0,
            phenotype: 1,
            behaviors: Vec::new(),
        }
    }

    /// A default cell at `position`.
    pub fn at(position: Real3) -> Self {
        let mut c = Self::new();
        c.position = position;
        c
    }

    // ── Scalar state ──────────────────────────────────────────────────────

    /// Registry identity; `CellUid::INVALID` until the cell is registered.
    #[inline]
    pub fn uid(&self) -> CellUid {
        self.uid
    }

    pub(crate) fn set_uid(&mut self, uid: CellUid) {
        self.uid = uid;
    }

    #[inline]
    pub fn position(&self) -> Real3 {
        self.position
    }

    pub fn set_position(&mut self, position: Real3) {
        self.position = position;
    }

    /// Displace the cell by `delta`.
    pub fn translate(&mut self, delta: Real3) {
        self.position += delta;
    }

    #[inline]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    /// Set the diameter and recompute the volume.
    pub fn set_diameter(&mut self, diameter: f64) {
        debug_assert!(diameter >= 0.0, "diameter must be non-negative");
        self.diameter = diameter;
        self.volume = VOLUME_COEFF * diameter.powi(3);
    }

    #[inline]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Set the volume and recompute the diameter.
    pub fn set_volume(&mut self, volume: f64) {
        debug_assert!(volume >= 0.0, "volume must be non-negative");
        self.volume = volume;
        self.diameter = (volume / VOLUME_COEFF).cbrt();
    }

    /// Grow (or shrink, for negative `dv`) by a volume increment, flooring at
    /// the minimum representable volume, and keep the diameter consistent.
    pub fn change_volume(&mut self, dv: f64) {
        self.set_volume((self.volume + dv).max(MIN_VOLUME));
    }

    #[inline]
    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn set_density(&mut self, density: f64) {
        debug_assert!(density >= 0.0, "density must be non-negative");
        self.density = density;
    }

    /// Mass under the current density and volume.
    #[inline]
    pub fn mass(&self) -> f64 {
        self.density * self.volume
    }

    /// Application-defined discrete classification.
    #[inline]
    pub fn phenotype(&self) -> i32 {
        self.phenotype
    }

    pub fn set_phenotype(&mut self, phenotype: i32) {
        self.phenotype = phenotype;
    }

    // ── Behavior attachment ───────────────────────────────────────────────

    /// Attach `unit`, initializing it on the setup path (no originating
    /// behavior — constructor parameters stand).
    ///
    /// Appends at the end of the sequence; units attached mid-step are first
    /// run on the *next* step.
    pub fn add_behavior(&mut self, mut unit: Box<dyn Behavior>) -> BehaviorResult<()> {
        unit.initialize(&NewAgentEvent::seed())?;
        self.behaviors.push(BehaviorSlot { unit: Some(unit), removed: false });
        Ok(())
    }

    /// Attach a fresh same-kind unit propagated from `origin`.
    ///
    /// Spawns a default-parameter instance of `origin`'s kind and initializes
    /// it with an event carrying `origin`, which snapshots the parameters.
    /// This is the only path by which a unit crosses to a new cell.
    pub fn attach_from(
        &mut self,
        origin: &dyn Behavior,
        cause: EventCause,
        mother: Option<&Cell>,
    ) -> BehaviorResult<()> {
        let mut unit = origin.spawn();
        unit.initialize(&NewAgentEvent { cause, mother, origin: Some(origin) })?;
        self.behaviors.push(BehaviorSlot { unit: Some(unit), removed: false });
        Ok(())
    }

    /// Number of attached units, excluding tombstoned slots.
    pub fn behavior_count(&self) -> usize {
        self.behaviors
            .iter()
            .filter(|s| !s.removed && s.unit.is_some())
            .count()
    }

    /// `true` if a live unit of `kind` is attached.
    pub fn has_behavior(&self, kind: BehaviorKind) -> bool {
        self.units().any(|u| u.kind() == kind)
    }

    /// Iterator over all live attached units in attachment order.
    pub fn units(&self) -> impl Iterator<Item = &dyn Behavior> {
        self.behaviors
            .iter()
            .filter(|s| !s.removed)
            .filter_map(|s| s.unit.as_deref())
    }

    // ── Step-driver slot API ──────────────────────────────────────────────
    //
    // The driver snapshots `slot_count()` pairs at step start, `take`s each
    // unit for the duration of its `run`, and either restores or discards it.
    // Slot indices are only stable between compactions — never hold one
    // across steps.

    /// Total slot count, including tombstones (the step-start snapshot bound).
    pub fn slot_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Take the unit out of slot `i` for running.  Returns `None` if the slot
    /// is tombstoned or the index is beyond the current sequence.
    pub fn take_slot(&mut self, i: usize) -> Option<Box<dyn Behavior>> {
        let slot = self.behaviors.get_mut(i)?;
        if slot.removed {
            return None;
        }
        slot.unit.take()
    }

    /// Return a unit taken via [`take_slot`][Self::take_slot].
    pub fn restore_slot(&mut self, i: usize, unit: Box<dyn Behavior>) {
        let slot = &mut self.behaviors[i];
        debug_assert!(slot.unit.is_none() && !slot.removed);
        slot.unit = Some(unit);
    }

    /// Tombstone slot `i` — the unit (already taken) is dropped and the slot
    /// is skipped until compaction.
    pub fn discard_slot(&mut self, i: usize) {
        let slot = &mut self.behaviors[i];
        slot.removed = true;
        slot.unit = None;
    }

    /// Physically erase tombstoned slots, preserving attachment order.
    /// Called by the driver at step end, never mid-iteration.
    pub fn compact_slots(&mut self) {
        self.behaviors.retain(|s| !s.removed);
    }

    // ── Division support ──────────────────────────────────────────────────

    /// A daughter cell carrying this cell's scalar state (position, size,
    /// density, phenotype) but none of its behaviors.  Used by the division
    /// protocol, which then splits the volume and propagates units.
    pub(crate) fn derived_copy(&self) -> Cell {
        Cell {
            uid: CellUid::INVALID,
            position: self.position,
            diameter: self.diameter,
            volume: self.volume,
            density: self.density,
            phenotype: self.phenotype,
            behaviors: Vec::new(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("uid", &self.uid)
            .field("position", &self.position)
            .field("diameter", &self.diameter)
            .field("volume", &self.volume)
            .field("density", &self.density)
            .field("phenotype", &self.phenotype)
            .field("behaviors", &self.behavior_count())
            .finish()
    }
}
