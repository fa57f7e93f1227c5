//! Threshold-gated volume growth.

use std::any::Any;

use cell_agent::{
    Behavior, BehaviorKind, BehaviorResult, Cell, NewAgentEvent, PropagationPolicy, RunControl,
    StepCtx, origin_as,
};

/// Grow the cell by a fixed volume rate each step while its diameter is at or
/// under a threshold; do nothing once the threshold is exceeded.
pub struct Growth {
    threshold: f64,
    growth_rate: f64,
    policy: PropagationPolicy,
}

impl Growth {
    /// `threshold` — diameter at or under which the cell still grows;
    /// `growth_rate` — volume added per simulated second.
    pub fn new(threshold: f64, growth_rate: f64) -> Self {
        Self { threshold, growth_rate, policy: PropagationPolicy::AlwaysCopy }
    }

    pub fn with_policy(mut self, policy: PropagationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }
}

impl Default for Growth {
    fn default() -> Self {
        Self::new(10.0, 1.0)
    }
}

impl Behavior for Growth {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Growth
    }

    fn policy(&self) -> PropagationPolicy {
        self.policy
    }

    fn spawn(&self) -> Box<dyn Behavior> {
        Box::new(Growth::default())
    }

    fn initialize(&mut self, event: &NewAgentEvent<'_>) -> BehaviorResult<()> {
        if let Some(origin) = origin_as::<Growth>(event, BehaviorKind::Growth)? {
            self.threshold = origin.threshold;
            self.growth_rate = origin.growth_rate;
            self.policy = origin.policy;
        }
        Ok(())
    }

    fn run(&mut self, cell: &mut Cell, ctx: &mut StepCtx<'_>) -> BehaviorResult<RunControl> {
        if cell.diameter() <= self.threshold {
            cell.change_volume(self.growth_rate * ctx.time_step);
        }
        Ok(RunControl::Continue)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
