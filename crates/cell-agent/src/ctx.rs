//! `StepCtx` — the capability bundle passed into every `run`, and the
//! division protocol.
//!
//! Replaces ambient "active simulation" state with explicit borrows: a
//! behavior can only reach what the driver hands it, which makes every unit
//! testable with a bare context and a fixed seed.

use cell_core::{Param, Real3, SimRng, Step};
use cell_field::RateBuffer;
use cell_spatial::NeighborIndex;

use crate::cell::Cell;
use crate::error::BehaviorResult;
use crate::event::EventCause;

/// Capabilities available to a behavior during one `run` invocation.
///
/// All borrows last for the duration of the step.  `neighbors` is a read-only
/// snapshot taken at step start; `rates` and `births` are write-only buffers
/// the driver consumes after every unit has run.
pub struct StepCtx<'a> {
    /// Current simulation step.
    pub step: Step,
    /// Simulated seconds per step — behaviors integrate rates over this.
    pub time_step: f64,
    /// Global run parameters (domain bounds etc.).
    pub param: &'a Param,
    /// Deterministic uniform random source.
    pub rng: &'a mut SimRng,
    /// Spatial snapshot for proximity queries.
    pub neighbors: &'a NeighborIndex,
    /// Substance rate-adjustment buffer (commutative accumulation).
    pub rates: &'a mut RateBuffer,
    births: &'a mut Vec<Cell>,
}

impl<'a> StepCtx<'a> {
    /// Assemble a context for one step.  Called by the driver (and directly
    /// by behavior unit tests).
    pub fn new(
        step: Step,
        param: &'a Param,
        rng: &'a mut SimRng,
        neighbors: &'a NeighborIndex,
        rates: &'a mut RateBuffer,
        births: &'a mut Vec<Cell>,
    ) -> Self {
        Self {
            step,
            time_step: param.time_step,
            param,
            rng,
            neighbors,
            rates,
            births,
        }
    }

    /// Number of cells created so far this step.
    pub fn pending_births(&self) -> usize {
        self.births.len()
    }

    /// Divide `mother`, producing a pending daughter that enters the registry
    /// at step end (and is first visited the *next* step).
    ///
    /// The fixed split rule: mother and daughter each take exactly half the
    /// mother's pre-division volume.  The daughter is placed adjacent —
    /// offset along a uniformly random direction by the sum of the two
    /// post-division radii — and inherits the mother's phenotype and density.
    ///
    /// Every mother unit whose [`PropagationPolicy`][crate::PropagationPolicy]
    /// copies on a division event is propagated onto the daughter through the
    /// initialize-with-origin protocol.  The unit that requested the division
    /// is mid-run (its slot is vacant) and therefore not propagated by
    /// policy; it attaches its own successor explicitly via the returned
    /// handle if it wants one, mirroring the reference behaviors.
    ///
    /// The mother keeps all of her own units.
    pub fn divide(&mut self, mother: &mut Cell) -> BehaviorResult<&mut Cell> {
        let half_volume = mother.volume() * 0.5;
        mother.set_volume(half_volume);

        let mut daughter = mother.derived_copy();
        daughter.set_volume(half_volume);

        let offset = self.rng.unit_vector() * (0.5 * (mother.diameter() + daughter.diameter()));
        daughter.set_position(mother.position() + offset);

        for unit in mother.units() {
            if unit.policy().copies_on(EventCause::CellDivision) {
                daughter.attach_from(unit, EventCause::CellDivision, Some(&*mother))?;
            }
        }

        self.births.push(daughter);
        let last = self.births.len() - 1;
        Ok(&mut self.births[last])
    }
}

/// Bounds of the domain interior a migrating cell of diameter `d` may occupy:
/// the configured bounds shrunk by a margin of `0.55 · d` on every side.
pub fn interior_bounds(param: &Param, diameter: f64) -> (f64, f64) {
    let margin = 0.55 * diameter;
    (param.min_bound + margin, param.max_bound - margin)
}

/// Clamp `position` to the interior bounds for a cell of diameter `d`.
/// Returns the clamped position and whether any axis was clamped.
pub fn clamp_to_interior(param: &Param, diameter: f64, position: Real3) -> (Real3, bool) {
    let (lo, hi) = interior_bounds(param, diameter);
    position.clamp_to(lo, hi)
}
