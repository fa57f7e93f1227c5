//! Unit tests for the built-in behavior kinds.

use cell_agent::{Behavior, BehaviorKind, Cell, RunControl, StepCtx};
use cell_core::{CellUid, Param, Real3, SimRng, Step, SubstanceId};
use cell_field::RateBuffer;
use cell_spatial::NeighborIndex;

use crate::{Growth, GrowthDivision, Migration, Secretion};

// ── Harness ───────────────────────────────────────────────────────────────────

/// Owns everything a `StepCtx` borrows, so tests can run units directly.
struct Harness {
    param: Param,
    rng: SimRng,
    neighbors: NeighborIndex,
    rates: RateBuffer,
    births: Vec<Cell>,
}

impl Harness {
    fn new() -> Self {
        Self {
            param: Param::default(),
            rng: SimRng::new(42),
            neighbors: NeighborIndex::empty(),
            rates: RateBuffer::new(),
            births: Vec::new(),
        }
    }

    fn run(&mut self, unit: &mut dyn Behavior, cell: &mut Cell) -> RunControl {
        let mut ctx = StepCtx::new(
            Step(0),
            &self.param,
            &mut self.rng,
            &self.neighbors,
            &mut self.rates,
            &mut self.births,
        );
        unit.run(cell, &mut ctx).expect("run must not err in these tests")
    }
}

// ── Growth ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod growth {
    use super::*;

    #[test]
    fn grows_by_rate_while_at_or_under_threshold() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let mut unit = Growth::new(3.0, 2.0);

        let v0 = cell.volume();
        assert_eq!(h.run(&mut unit, &mut cell), RunControl::Continue);
        assert!((cell.volume() - (v0 + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn noop_once_over_threshold() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(3.5);
        let mut unit = Growth::new(3.0, 2.0);

        let v0 = cell.volume();
        h.run(&mut unit, &mut cell);
        assert_eq!(cell.volume(), v0);
    }

    #[test]
    fn growth_stops_after_crossing_threshold() {
        // Reference scenario: d = 2.0, threshold 3.0, rate 2.0, dt 1.0.
        // Volume grows by exactly 2.0 per step until the diameter exceeds
        // 3.0, then further runs are no-ops.
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let mut unit = Growth::new(3.0, 2.0);

        let mut prev_v = cell.volume();
        let mut prev_d = cell.diameter();
        while cell.diameter() <= 3.0 {
            h.run(&mut unit, &mut cell);
            assert!((cell.volume() - prev_v - 2.0).abs() < 1e-12);
            assert!(cell.diameter() > prev_d);
            prev_v = cell.volume();
            prev_d = cell.diameter();
        }
        h.run(&mut unit, &mut cell);
        assert_eq!(cell.volume(), prev_v);
    }

    #[test]
    fn negative_rate_shrinks_degenerately() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let mut unit = Growth::new(3.0, -1.0);

        let v0 = cell.volume();
        h.run(&mut unit, &mut cell);
        assert!(cell.volume() < v0);
    }
}

// ── GrowthDivision ────────────────────────────────────────────────────────────

#[cfg(test)]
mod growth_division {
    use super::*;

    #[test]
    fn grows_under_threshold_and_never_divides_that_step() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let mut unit = GrowthDivision::new(3.0, 2.0, 1.0);

        h.run(&mut unit, &mut cell);
        assert!(h.births.is_empty(), "growth and division are mutually exclusive");
    }

    #[test]
    fn divides_over_threshold_with_certain_probability() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(3.5);
        let v0 = cell.volume();
        let mut unit = GrowthDivision::new(3.0, 2.0, 1.0);

        assert_eq!(h.run(&mut unit, &mut cell), RunControl::Continue);
        assert_eq!(h.births.len(), 1);

        // Volume conservation under the equal-halves rule.
        let daughter = &h.births[0];
        assert!((cell.volume() + daughter.volume() - v0).abs() < 1e-12);
        assert!((cell.volume() - daughter.volume()).abs() < 1e-12);
    }

    #[test]
    fn daughter_carries_a_same_kind_unit_with_snapshot_parameters() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(3.5);
        let mut unit = GrowthDivision::new(3.0, 2.0, 0.75).with_proximity_veto(1.5, 4.0);
        // Disarm the veto for this test: no neighbors indexed, so it passes.

        h.run(&mut unit, &mut cell);
        let daughter = &h.births[0];
        assert_eq!(daughter.behavior_count(), 1);

        let copied = daughter
            .units()
            .next()
            .unwrap()
            .as_any()
            .downcast_ref::<GrowthDivision>()
            .unwrap();
        assert_eq!(copied.threshold(), 3.0);
        assert_eq!(copied.growth_rate(), 2.0);
        assert_eq!(copied.division_probability(), 0.75);
    }

    #[test]
    fn improbable_division_defers() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        cell.set_diameter(3.5);
        let v0 = cell.volume();
        let mut unit = GrowthDivision::new(3.0, 2.0, 0.0);

        // The seeded first draw is strictly positive, so u <= 0.0 fails.
        h.run(&mut unit, &mut cell);
        assert!(h.births.is_empty());
        assert_eq!(cell.volume(), v0); // no growth either — over threshold
    }

    fn heterotypic_neighbor_index() -> NeighborIndex {
        // Querying cell will sit at the origin with phenotype 1; the indexed
        // neighbor has phenotype 2 at distance 1.0.
        NeighborIndex::build([(CellUid(7), Real3::new(1.0, 0.0, 0.0), 2)])
    }

    #[test]
    fn heterotypic_neighbor_vetoes_and_detaches() {
        let mut h = Harness::new();
        h.neighbors = heterotypic_neighbor_index();

        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        cell.set_phenotype(1);
        let v0 = cell.volume();
        let mut unit = GrowthDivision::new(3.0, 2.0, 1.0).with_proximity_veto(1.5, 4.0);

        assert_eq!(h.run(&mut unit, &mut cell), RunControl::RemoveSelf);
        assert_eq!(cell.volume(), v0, "a vetoed step must not grow");
        assert!(h.births.is_empty(), "a vetoed step must not divide");
    }

    #[test]
    fn homotypic_neighbor_does_not_veto() {
        let mut h = Harness::new();
        h.neighbors = NeighborIndex::build([(CellUid(7), Real3::new(1.0, 0.0, 0.0), 1)]);

        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        cell.set_phenotype(1);
        let v0 = cell.volume();
        let mut unit = GrowthDivision::new(3.0, 2.0, 1.0).with_proximity_veto(1.5, 4.0);

        assert_eq!(h.run(&mut unit, &mut cell), RunControl::Continue);
        assert!(cell.volume() > v0);
    }

    #[test]
    fn distant_heterotypic_neighbor_does_not_veto() {
        let mut h = Harness::new();
        h.neighbors = NeighborIndex::build([(CellUid(7), Real3::new(3.0, 0.0, 0.0), 2)]);

        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let mut unit = GrowthDivision::new(3.0, 2.0, 1.0).with_proximity_veto(1.5, 4.0);

        // Within the safe search radius (4.0) but not closer than
        // min_distance (1.5) → no veto.
        assert_eq!(h.run(&mut unit, &mut cell), RunControl::Continue);
    }

    #[test]
    fn growth_resumes_from_same_size_after_veto_clears() {
        let mut h = Harness::new();
        h.neighbors = heterotypic_neighbor_index();

        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let v0 = cell.volume();

        let mut vetoed = GrowthDivision::new(3.0, 2.0, 1.0).with_proximity_veto(1.5, 4.0);
        assert_eq!(h.run(&mut vetoed, &mut cell), RunControl::RemoveSelf);
        assert_eq!(cell.volume(), v0);

        // Next step: neighbor gone, a (re-attached) unit grows from v0.
        h.neighbors = NeighborIndex::empty();
        let mut fresh = GrowthDivision::new(3.0, 2.0, 1.0).with_proximity_veto(1.5, 4.0);
        h.run(&mut fresh, &mut cell);
        assert!((cell.volume() - (v0 + 2.0)).abs() < 1e-12);
    }

    #[test]
    fn disarmed_veto_ignores_neighbors() {
        let mut h = Harness::new();
        h.neighbors = heterotypic_neighbor_index();

        let mut cell = Cell::new();
        cell.set_diameter(2.0);
        let mut unit = GrowthDivision::new(3.0, 2.0, 1.0); // safe_distance = 0

        assert_eq!(h.run(&mut unit, &mut cell), RunControl::Continue);
    }
}

// ── Migration ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod migration {
    use super::*;

    #[test]
    fn zero_probability_never_moves() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::new(1.0, 2.0, 3.0));
        cell.set_diameter(2.0);
        let mut unit = Migration::new(1.0, 0.0, false);

        for _ in 0..100 {
            h.run(&mut unit, &mut cell);
        }
        assert_eq!(cell.position(), Real3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn certain_probability_moves_on_first_run() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::ZERO);
        cell.set_diameter(2.0);
        let mut unit = Migration::new(1.0, 1.0, false);

        h.run(&mut unit, &mut cell);
        let p = cell.position();
        assert_ne!(p.x, 0.0);
        assert_ne!(p.y, 0.0);
        assert_ne!(p.z, 0.0);
    }

    #[test]
    fn displacement_bounded_by_rate_times_dt() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::ZERO);
        cell.set_diameter(2.0);
        let mut unit = Migration::new(0.25, 1.0, false);

        for _ in 0..50 {
            let before = cell.position();
            h.run(&mut unit, &mut cell);
            let d = cell.position() - before;
            for c in [d.x, d.y, d.z] {
                assert!(c.abs() <= 0.25);
            }
        }
    }

    #[test]
    fn clamps_exactly_to_interior_margin() {
        let mut h = Harness::new();
        // Domain is ±50; diameter 2.0 → margin 1.1 → interior bound 48.9.
        let mut cell = Cell::at(Real3::new(49.9, 0.0, 0.0));
        cell.set_diameter(2.0);
        // Huge rate guarantees the draw overshoots in x at least sometimes;
        // run until a clamp occurs.
        let mut unit = Migration::new(100.0, 1.0, false);

        let mut clamped = false;
        for _ in 0..50 {
            h.run(&mut unit, &mut cell);
            let p = cell.position();
            assert!(p.x <= 48.9 && p.x >= -48.9);
            assert!(p.y <= 48.9 && p.y >= -48.9);
            assert!(p.z <= 48.9 && p.z >= -48.9);
            if p.x == 48.9 || p.x == -48.9 {
                clamped = true;
                break;
            }
        }
        assert!(clamped, "a ±100 draw from x=49.9 must hit the bound quickly");
    }

    #[test]
    fn sticky_migrator_detaches_at_boundary() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::new(49.9, 0.0, 0.0));
        cell.set_diameter(2.0);
        let mut unit = Migration::new(100.0, 1.0, true);

        let mut control = RunControl::Continue;
        for _ in 0..50 {
            control = h.run(&mut unit, &mut cell);
            if control == RunControl::RemoveSelf {
                break;
            }
        }
        assert_eq!(control, RunControl::RemoveSelf);
    }

    #[test]
    fn sticky_migrator_attaches_successor() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::new(49.9, 0.0, 0.0));
        cell.set_diameter(2.0);
        let mut unit = Migration::new(100.0, 1.0, true)
            .with_successor(|| Box::new(Growth::new(10.0, 1.0)));

        for _ in 0..50 {
            if h.run(&mut unit, &mut cell) == RunControl::RemoveSelf {
                break;
            }
        }
        assert!(cell.has_behavior(BehaviorKind::Growth));
    }

    #[test]
    fn zero_rate_draws_no_displacement() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::new(1.0, 1.0, 1.0));
        cell.set_diameter(2.0);
        let mut unit = Migration::new(0.0, 1.0, false);

        h.run(&mut unit, &mut cell);
        assert_eq!(cell.position(), Real3::new(1.0, 1.0, 1.0));
    }
}

// ── Secretion ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod secretion {
    use super::*;

    #[test]
    fn records_one_adjustment_per_run() {
        let mut h = Harness::new();
        let mut cell = Cell::at(Real3::new(2.0, 0.0, 0.0));
        let mut unit = Secretion::new(SubstanceId(0), 0.2e-3);

        h.run(&mut unit, &mut cell);
        h.run(&mut unit, &mut cell);
        assert_eq!(h.rates.len(), 2);
    }

    #[test]
    fn uptake_rate_is_passed_through_signed() {
        let mut h = Harness::new();
        let mut cell = Cell::new();
        let mut unit = Secretion::new(SubstanceId(3), -0.5);

        h.run(&mut unit, &mut cell);
        assert_eq!(h.rates.len(), 1);
    }
}

// ── Initialize protocol across kinds ──────────────────────────────────────────

#[cfg(test)]
mod initialize {
    use super::*;
    use cell_agent::{BehaviorError, NewAgentEvent};

    #[test]
    fn cross_kind_origin_is_rejected_by_every_kind() {
        let growth = Growth::new(3.0, 2.0);
        let mut migration = Migration::default();
        let err = migration
            .initialize(&NewAgentEvent::division(None, &growth))
            .unwrap_err();
        assert!(matches!(
            err,
            BehaviorError::KindMismatch {
                expected: BehaviorKind::Migration,
                found: BehaviorKind::Growth,
            }
        ));
    }

    #[test]
    fn propagated_migration_snapshots_all_parameters() {
        let origin = Migration::new(2.5, 0.3, true);
        let mut unit = Migration::default();
        unit.initialize(&NewAgentEvent::division(None, &origin)).unwrap();
        assert_eq!(unit.migration_rate(), 2.5);
        assert_eq!(unit.probability(), 0.3);
        assert!(unit.stick_to_boundary());
    }

    #[test]
    fn propagated_secretion_snapshots_substance_and_rate() {
        let origin = Secretion::new(SubstanceId(4), -0.25);
        let mut unit = Secretion::default();
        unit.initialize(&NewAgentEvent::division(None, &origin)).unwrap();
        assert_eq!(unit.substance(), SubstanceId(4));
        assert_eq!(unit.rate(), -0.25);
    }
}
