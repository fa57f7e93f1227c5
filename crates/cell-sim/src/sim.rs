//! The `Simulation` struct and its step loop.

use cell_agent::{Cell, CellStore, RunControl, StepCtx};
use cell_core::{Param, SimClock, SimRng, Step};
use cell_field::{RateBuffer, SubstanceGrid};
use cell_spatial::NeighborIndex;

use crate::{SimObserver, SimResult};

/// The main simulation runner.
///
/// Holds all simulation state and drives the step loop:
///
/// 1. **Index**: rebuild the neighbor index from every registered cell's
///    position and phenotype.
/// 2. **Snapshot**: record the `(cell, slot)` pairs attached at step start.
///    Exactly these units run this step; units attached mid-step wait until
///    the next one, and units detached mid-step are skipped.
/// 3. **Run**: each unit is taken out of its slot, given `&mut` access to its
///    own cell plus a [`StepCtx`], then restored or discarded per its
///    [`RunControl`].
/// 4. **Register**: daughters buffered by [`StepCtx::divide`] enter the
///    registry and receive their uids.
/// 5. **Field**: buffered rate adjustments are flushed into the substance
///    lattices, then first-order decay is applied.
/// 6. **Compact**: tombstoned behavior slots are physically erased.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Simulation {
    /// Global run parameters (bounds, step count, seed, …).
    pub param: Param,

    /// Simulation clock — tracks the current step and maps to sim seconds.
    pub clock: SimClock,

    /// The cell registry.  Uids are assigned in registration order.
    pub cells: CellStore,

    /// Master deterministic RNG.  Every stochastic decision in the run draws
    /// from this single stream, so a seed fully determines the outcome.
    pub rng: SimRng,

    /// Substance concentration lattices.
    pub grid: SubstanceGrid,

    /// Rate adjustments accumulated during the current step.
    rates: RateBuffer,

    /// Daughters created during the current step, registered at step end.
    births: Vec<Cell>,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("param", &self.param)
            .field("clock", &self.clock)
            .field("cell_count", &self.cells.len())
            .finish_non_exhaustive()
    }
}

impl Simulation {
    pub(crate) fn assemble(param: Param, cells: CellStore, grid: SubstanceGrid) -> Self {
        Self {
            clock: param.make_clock(),
            rng: SimRng::new(param.seed),
            param,
            cells,
            grid,
            rates: RateBuffer::new(),
            births: Vec::new(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current step to `param.end_step()`.
    ///
    /// Calls observer hooks at every step boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            let now = self.clock.current_step;
            if now >= self.param.end_step() {
                break;
            }

            observer.on_step_start(now);
            let ran = self.process_step(now)?;
            observer.on_step_end(now, ran, self.cells.len());
            if self.param.snapshot_interval_steps > 0
                && now.0.is_multiple_of(self.param.snapshot_interval_steps)
            {
                observer.on_snapshot(now, &self.cells, &self.grid);
            }

            self.clock.advance();
        }
        observer.on_sim_end(self.clock.current_step);
        Ok(())
    }

    /// Run exactly `n` steps from the current position (ignores `end_step`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_steps<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_step;
            observer.on_step_start(now);
            let ran = self.process_step(now)?;
            observer.on_step_end(now, ran, self.cells.len());
            if self.param.snapshot_interval_steps > 0
                && now.0.is_multiple_of(self.param.snapshot_interval_steps)
            {
                observer.on_snapshot(now, &self.cells, &self.grid);
            }
            self.clock.advance();
        }
        Ok(())
    }

    // ── Core step processing ──────────────────────────────────────────────

    fn process_step(&mut self, now: Step) -> SimResult<usize> {
        // ── Phase 1: rebuild the neighbor index ───────────────────────────
        //
        // Bulk-loaded once per step and shared read-only by every unit.
        // Positions mutated during the step become visible next step.
        let index = NeighborIndex::build(self.cells.spatial_snapshot());

        // ── Phase 2: snapshot the (cell, slot) pairs to visit ─────────────
        //
        // Slot indices include tombstones; `take_slot` returns `None` for
        // slots detached between snapshot and visit, which are skipped.
        let visits: Vec<(usize, usize)> = self
            .cells
            .cells
            .iter()
            .enumerate()
            .flat_map(|(ci, cell)| (0..cell.slot_count()).map(move |bi| (ci, bi)))
            .collect();

        // ── Phase 3: run each snapshotted unit exactly once ───────────────
        let mut ran = 0usize;
        {
            // Explicit field borrows so the borrow checker sees that the
            // context and the visited cell are disjoint.
            let param = &self.param;
            let rng = &mut self.rng;
            let rates = &mut self.rates;
            let births = &mut self.births;
            let cells = &mut self.cells.cells;

            let mut ctx = StepCtx::new(now, param, rng, &index, rates, births);
            for (ci, bi) in visits {
                let cell = &mut cells[ci];
                let Some(mut unit) = cell.take_slot(bi) else {
                    continue;
                };
                match unit.run(cell, &mut ctx) {
                    Ok(RunControl::Continue) => cells[ci].restore_slot(bi, unit),
                    Ok(RunControl::RemoveSelf) => cells[ci].discard_slot(bi),
                    // The failing unit goes back into its slot so the
                    // registry stays inspectable after the abort; units
                    // later in the snapshot have not run.  Daughters
                    // buffered so far register at the end of the next
                    // successful step.
                    Err(e) => {
                        cells[ci].restore_slot(bi, unit);
                        return Err(e.into());
                    }
                }
                ran += 1;
            }
        }

        // ── Phase 4: register pending daughters ───────────────────────────
        //
        // Daughters get their uid here and are first visited next step.
        for daughter in self.births.drain(..) {
            self.cells.register(daughter);
        }

        // ── Phase 5: flush rate adjustments, then decay ───────────────────
        let dt = self.clock.time_step;
        self.grid.flush(&mut self.rates, dt)?;
        self.grid.decay(dt);

        // ── Phase 6: compact tombstoned slots ─────────────────────────────
        for cell in &mut self.cells.cells {
            cell.compact_slots();
        }

        Ok(ran)
    }
}
