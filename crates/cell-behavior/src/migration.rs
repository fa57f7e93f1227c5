//! Random-walk migration with boundary clamping.

use std::any::Any;

use cell_agent::{
    Behavior, BehaviorKind, BehaviorResult, Cell, NewAgentEvent, PropagationPolicy, RunControl,
    StepCtx, clamp_to_interior, origin_as,
};
use cell_core::Real3;

/// Constructor for the optional replacement unit attached when a sticky
/// migrator reaches the boundary.
pub type SuccessorFn = fn() -> Box<dyn Behavior>;

/// Each step, with probability `probability`, displace the cell by a vector
/// drawn uniformly in `±(migration_rate × time_step)` per axis, then clamp
/// every axis to the domain interior minus a margin of `0.55 × diameter`.
///
/// If any axis was clamped and `stick_to_boundary` is set, the unit detaches
/// itself — the cell never moves again — optionally attaching a successor
/// unit first.
///
/// The probability gate is the strict `SimRng::chance`, so that 0.0 can
/// never move and 1.0 always does.  Division uses the inclusive gate; the
/// two conventions live side by side on `SimRng`.
pub struct Migration {
    migration_rate: f64,
    probability: f64,
    stick_to_boundary: bool,
    successor: Option<SuccessorFn>,
    policy: PropagationPolicy,
}

impl Migration {
    /// `migration_rate` — maximum displacement per simulated second per axis.
    pub fn new(migration_rate: f64, probability: f64, stick_to_boundary: bool) -> Self {
        Self {
            migration_rate,
            probability,
            stick_to_boundary,
            successor: None,
            policy: PropagationPolicy::AlwaysCopy,
        }
    }

    /// Attach `make()` to the cell when this unit sticks to the boundary and
    /// removes itself (e.g. switch a migrator to plain growth).
    pub fn with_successor(mut self, make: SuccessorFn) -> Self {
        self.successor = Some(make);
        self
    }

    pub fn with_policy(mut self, policy: PropagationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn migration_rate(&self) -> f64 {
        self.migration_rate
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn stick_to_boundary(&self) -> bool {
        self.stick_to_boundary
    }
}

impl Default for Migration {
    fn default() -> Self {
        Self::new(1.0, 1.0, false)
    }
}

impl Behavior for Migration {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::Migration
    }

    fn policy(&self) -> PropagationPolicy {
        self.policy
    }

    fn spawn(&self) -> Box<dyn Behavior> {
        Box::new(Migration::default())
    }

    fn initialize(&mut self, event: &NewAgentEvent<'_>) -> BehaviorResult<()> {
        if let Some(origin) = origin_as::<Migration>(event, BehaviorKind::Migration)? {
            self.migration_rate = origin.migration_rate;
            self.probability = origin.probability;
            self.stick_to_boundary = origin.stick_to_boundary;
            self.successor = origin.successor;
            self.policy = origin.policy;
        }
        Ok(())
    }

    fn run(&mut self, cell: &mut Cell, ctx: &mut StepCtx<'_>) -> BehaviorResult<RunControl> {
        if !ctx.rng.chance(self.probability) {
            return Ok(RunControl::Continue);
        }

        let delta = self.migration_rate * ctx.time_step;
        // A non-positive rate gives an empty draw range; treat it as "no
        // displacement" rather than a panic.
        let displacement = if delta > 0.0 {
            ctx.rng.uniform_box(-delta, delta)
        } else {
            Real3::ZERO
        };
        cell.translate(displacement);

        let (clamped, on_boundary) = clamp_to_interior(ctx.param, cell.diameter(), cell.position());
        if on_boundary {
            cell.set_position(clamped);
            if self.stick_to_boundary {
                if let Some(make) = self.successor {
                    cell.add_behavior(make())?;
                }
                return Ok(RunControl::RemoveSelf);
            }
        }
        Ok(RunControl::Continue)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
