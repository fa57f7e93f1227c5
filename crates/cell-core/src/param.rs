//! Top-level run parameters.

use crate::{CoreError, CoreResult, SimClock, Step};

/// Global simulation parameters.
///
/// Typically constructed in the scenario binary and passed to the simulation
/// builder.  Behavior-specific parameters (rates, thresholds, probabilities)
/// live on the behavior units themselves, not here.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    /// Lower bound of the cubic simulation domain, identical on all axes.
    pub min_bound: f64,

    /// Upper bound of the cubic simulation domain.
    pub max_bound: f64,

    /// Simulated seconds per step.  Behaviors multiply rates by this value.
    pub time_step: f64,

    /// Total steps to simulate.
    pub total_steps: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Invoke the observer snapshot hook every N steps; 0 disables snapshots.
    pub snapshot_interval_steps: u64,
}

impl Param {
    /// The step at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_step(&self) -> Step {
        Step(self.total_steps)
    }

    /// Edge length of the simulation domain.
    #[inline]
    pub fn extent(&self) -> f64 {
        self.max_bound - self.min_bound
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.time_step)
    }

    /// Reject structurally impossible parameter sets.
    ///
    /// Degenerate but representable values (negative rates, probabilities
    /// above 1) are deliberately *not* rejected here — they belong to the
    /// behavior units and produce degenerate but well-defined dynamics.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_bound <= self.min_bound {
            return Err(CoreError::Config(format!(
                "max_bound {} must exceed min_bound {}",
                self.max_bound, self.min_bound
            )));
        }
        if !(self.time_step > 0.0) {
            return Err(CoreError::Config(format!(
                "time_step must be positive, got {}",
                self.time_step
            )));
        }
        Ok(())
    }
}

impl Default for Param {
    /// A closed ±50 cube at 1 s/step — the domain used by the reference
    /// scenarios.
    fn default() -> Self {
        Self {
            min_bound: -50.0,
            max_bound: 50.0,
            time_step: 1.0,
            total_steps: 0,
            seed: 42,
            snapshot_interval_steps: 0,
        }
    }
}
