//! Per-step rate accumulation buffer.

use cell_core::{Real3, SubstanceId};

/// One recorded rate adjustment: `rate` (signed, per simulated second) applied
/// to `substance` at `position`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateAdjustment {
    pub substance: SubstanceId,
    pub position: Real3,
    pub rate: f64,
}

/// Accumulates substance rate adjustments during a step.
///
/// Behaviors push into this buffer; the step driver drains it into the
/// [`SubstanceGrid`][crate::SubstanceGrid] after every behavior has run.
/// Accumulation is commutative — the flushed result is independent of the
/// order in which adjustments were recorded.
#[derive(Default)]
pub struct RateBuffer {
    pub(crate) adjustments: Vec<RateAdjustment>,
}

impl RateBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a production (`rate > 0`) or uptake (`rate < 0`) adjustment at
    /// `position`.  No validation happens here; an undefined `substance`
    /// surfaces as an error at flush time.
    pub fn adjust(&mut self, substance: SubstanceId, position: Real3, rate: f64) {
        self.adjustments.push(RateAdjustment { substance, position, rate });
    }

    /// Number of adjustments recorded since the last flush.
    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}
