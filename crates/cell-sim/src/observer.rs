//! Simulation observer trait for progress reporting and data collection.

use cell_agent::CellStore;
use cell_core::Step;
use cell_field::SubstanceGrid;

/// Callbacks invoked by [`Simulation::run`][crate::Simulation::run] at key
/// points in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, ran: usize, population: usize) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: ran {ran} units, {population} cells");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each step, before any processing.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called at the end of each step.
    ///
    /// `ran` is the number of behavior units that ran this step;
    /// `population` is the cell count after pending daughters registered.
    fn on_step_end(&mut self, _step: Step, _ran: usize, _population: usize) {}

    /// Called at snapshot intervals (every `param.snapshot_interval_steps`
    /// steps).
    ///
    /// Provides read-only access to the full cell registry and substance
    /// lattices so output writers can record state without the simulation
    /// knowing about any specific output format.
    fn on_snapshot(&mut self, _step: Step, _cells: &CellStore, _grid: &SubstanceGrid) {}

    /// Called once after the final step completes.
    fn on_sim_end(&mut self, _final_step: Step) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
