//! Growth with stochastic division, optionally vetoed by heterotypic
//! neighbors.

use std::any::Any;

use cell_agent::{
    Behavior, BehaviorKind, BehaviorResult, Cell, EventCause, NewAgentEvent, PropagationPolicy,
    RunControl, StepCtx, origin_as,
};

/// Grow while at or under a diameter threshold; once over it, draw one
/// uniform number per step and divide when the draw is at or under the
/// division probability.
///
/// With `safe_distance > 0` a proximity veto runs first: if any cell of a
/// *different* phenotype sits closer than `min_distance`, the unit detaches
/// itself and neither grows nor divides that step — division near a
/// heterotypic neighbor is deferred indefinitely.
///
/// Growth and division are mutually exclusive within one step: a cell at or
/// under the threshold never attempts division in the step it grows.
///
/// The default policy is `NeverCopy`: the unit hands itself to the daughter
/// explicitly after the division, so a policy copy would attach it twice.
pub struct GrowthDivision {
    threshold: f64,
    growth_rate: f64,
    division_probability: f64,
    min_distance: f64,
    safe_distance: f64,
    policy: PropagationPolicy,
}

impl GrowthDivision {
    pub fn new(threshold: f64, growth_rate: f64, division_probability: f64) -> Self {
        Self {
            threshold,
            growth_rate,
            division_probability,
            min_distance: 1.0,
            safe_distance: 0.0,
            policy: PropagationPolicy::NeverCopy,
        }
    }

    /// Arm the heterotypic-neighbor veto: search within `safe_distance` and
    /// defer division if a different-phenotype cell is closer than
    /// `min_distance`.
    pub fn with_proximity_veto(mut self, min_distance: f64, safe_distance: f64) -> Self {
        self.min_distance = min_distance;
        self.safe_distance = safe_distance;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    pub fn division_probability(&self) -> f64 {
        self.division_probability
    }
}

impl Default for GrowthDivision {
    fn default() -> Self {
        Self::new(10.0, 1.0, 1.0)
    }
}

impl Behavior for GrowthDivision {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::GrowthDivision
    }

    fn policy(&self) -> PropagationPolicy {
        self.policy
    }

    fn spawn(&self) -> Box<dyn Behavior> {
        Box::new(GrowthDivision::default())
    }

    fn initialize(&mut self, event: &NewAgentEvent<'_>) -> BehaviorResult<()> {
        if let Some(origin) = origin_as::<GrowthDivision>(event, BehaviorKind::GrowthDivision)? {
            self.threshold = origin.threshold;
            self.growth_rate = origin.growth_rate;
            self.division_probability = origin.division_probability;
            self.min_distance = origin.min_distance;
            self.safe_distance = origin.safe_distance;
            self.policy = origin.policy;
        }
        Ok(())
    }

    fn run(&mut self, cell: &mut Cell, ctx: &mut StepCtx<'_>) -> BehaviorResult<RunControl> {
        if self.safe_distance > 0.0 {
            let mut blocked = false;
            let min_d2 = self.min_distance * self.min_distance;
            ctx.neighbors.for_each_neighbor(
                cell.position(),
                self.safe_distance * self.safe_distance,
                |hit| {
                    if hit.uid != cell.uid()
                        && hit.phenotype != cell.phenotype()
                        && hit.squared_distance < min_d2
                    {
                        blocked = true;
                    }
                },
            );
            if blocked {
                return Ok(RunControl::RemoveSelf);
            }
        }

        if cell.diameter() <= self.threshold {
            cell.change_volume(self.growth_rate * ctx.time_step);
        } else if ctx.rng.chance_inclusive(self.division_probability) {
            let daughter = ctx.divide(cell)?;
            daughter.attach_from(&*self, EventCause::CellDivision, None)?;
        }
        Ok(RunControl::Continue)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
