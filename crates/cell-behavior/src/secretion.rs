//! Fixed-rate substance production or uptake.

use std::any::Any;

use cell_agent::{
    Behavior, BehaviorKind, BehaviorResult, Cell, NewAgentEvent, PropagationPolicy, RunControl,
    StepCtx, origin_as,
};
use cell_core::SubstanceId;

/// Each step, adjust the named substance at the cell's current position by a
/// signed rate: positive produces, negative takes up.
///
/// The unit only records the adjustment; the grid accumulates all of a step's
/// adjustments commutatively and integrates them after every behavior ran.
pub struct Secretion {
    substance: SubstanceId,
    rate: f64,
    policy: PropagationPolicy,
}

impl Secretion {
    pub fn new(substance: SubstanceId, rate: f64) -> Self {
        Self { substance, rate, policy: PropagationPolicy::AlwaysCopy }
    }

    pub fn with_policy(mut self, policy: PropagationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn substance(&self) -> SubstanceId {
        self.substance
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl Default for Secretion {
    fn default() -> Self {
        Self::new(SubstanceId::INVALID, 0.0)
    }
}

impl Behavior for Secretion {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Secretion
    }

    fn policy(&self) -> PropagationPolicy {
        self.policy
    }

    fn spawn(&self) -> Box<dyn Behavior> {
        Box::new(Secretion::default())
    }

    fn initialize(&mut self, event: &NewAgentEvent<'_>) -> BehaviorResult<()> {
        if let Some(origin) = origin_as::<Secretion>(event, BehaviorKind::Secretion)? {
            self.substance = origin.substance;
            self.rate = origin.rate;
            self.policy = origin.policy;
        }
        Ok(())
    }

    fn run(&mut self, cell: &mut Cell, ctx: &mut StepCtx<'_>) -> BehaviorResult<RunControl> {
        ctx.rates.adjust(self.substance, cell.position(), self.rate);
        Ok(RunControl::Continue)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
