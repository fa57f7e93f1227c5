//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Step` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   simulated_time = step * time_step
//!
//! Using an integer step as the canonical time unit means all scheduling
//! arithmetic is exact (no floating-point drift) and comparisons are O(1).
//! Behaviors that integrate rates multiply by `time_step` themselves.

use std::fmt;

// ── Step ─────────────────────────────────────────────────────────────────────

/// An absolute simulation step counter.
///
/// Stored as `u64`: even at one step per simulated millisecond a u64 outlasts
/// any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// Return the step `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Step {
        Step(self.0 + n)
    }

    /// Steps elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Step) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between step counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many simulated seconds one step represents.  Default: 1.0.
    pub time_step: f64,
    /// The current step — advanced by `SimClock::advance()` each iteration.
    pub current_step: Step,
}

impl SimClock {
    /// Create a clock at step 0 with the given resolution.
    pub fn new(time_step: f64) -> Self {
        Self { time_step, current_step: Step::ZERO }
    }

    /// Advance to the next step.
    #[inline]
    pub fn advance(&mut self) {
        self.current_step = self.current_step.offset(1);
    }

    /// Simulated seconds elapsed since step 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_step.0 as f64 * self.time_step
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t = {:.1}s)", self.current_step, self.elapsed_secs())
    }
}
