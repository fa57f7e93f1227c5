//! Unit tests for cell-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CellUid, SubstanceId};

    #[test]
    fn index_roundtrip() {
        let id = CellUid(42);
        assert_eq!(id.index(), 42);
        assert_eq!(CellUid::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CellUid(0) < CellUid(1));
        assert!(SubstanceId(100) > SubstanceId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(CellUid::INVALID.0, u32::MAX);
        assert_eq!(SubstanceId::INVALID.0, u16::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(CellUid(7).to_string(), "CellUid(7)");
    }
}

#[cfg(test)]
mod real3 {
    use crate::Real3;

    #[test]
    fn squared_distance() {
        let a = Real3::new(0.0, 0.0, 0.0);
        let b = Real3::new(3.0, 4.0, 0.0);
        assert_eq!(a.squared_distance(b), 25.0);
        assert_eq!(b.squared_distance(a), 25.0);
    }

    #[test]
    fn arithmetic() {
        let a = Real3::new(1.0, 2.0, 3.0);
        let b = Real3::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Real3::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Real3::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, Real3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Real3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn clamp_reports_change() {
        let inside = Real3::new(0.0, 0.0, 0.0);
        let (c, moved) = inside.clamp_to(-1.0, 1.0);
        assert_eq!(c, inside);
        assert!(!moved);

        let outside = Real3::new(2.0, 0.0, -3.0);
        let (c, moved) = outside.clamp_to(-1.0, 1.0);
        assert_eq!(c, Real3::new(1.0, 0.0, -1.0));
        assert!(moved);
    }

    #[test]
    fn array_roundtrip() {
        let v = Real3::new(1.0, -2.0, 3.5);
        assert_eq!(Real3::from(v.to_array()), v);
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Step};

    #[test]
    fn step_arithmetic() {
        let s = Step(10);
        assert_eq!(s + 5, Step(15));
        assert_eq!(s.offset(3), Step(13));
        assert_eq!(Step(15) - Step(10), 5u64);
        assert_eq!(Step(15).since(Step(10)), 5);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.5);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current_step, Step(2));
        assert_eq!(clock.elapsed_secs(), 1.0);
    }
}

#[cfg(test)]
mod param {
    use crate::Param;

    #[test]
    fn default_matches_reference_domain() {
        let p = Param::default();
        assert_eq!(p.min_bound, -50.0);
        assert_eq!(p.max_bound, 50.0);
        assert_eq!(p.time_step, 1.0);
        assert_eq!(p.extent(), 100.0);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let p = Param { min_bound: 10.0, max_bound: -10.0, ..Param::default() };
        assert!(p.validate().is_err());
    }

    #[test]
    fn zero_time_step_rejected() {
        let p = Param { time_step: 0.0, ..Param::default() };
        assert!(p.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_given_seed() {
        let mut a = SimRng::new(999);
        let mut b = SimRng::new(999);
        for _ in 0..10 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        assert_ne!(a.uniform(), b.uniform());
    }

    #[test]
    fn uniform_is_half_open() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn uniform_box_within_bounds() {
        let mut rng = SimRng::new(7);
        for _ in 0..100 {
            let v = rng.uniform_box(-2.0, 3.0);
            for c in [v.x, v.y, v.z] {
                assert!((-2.0..3.0).contains(&c));
            }
        }
    }

    #[test]
    fn unit_vector_has_unit_norm() {
        let mut rng = SimRng::new(7);
        for _ in 0..100 {
            let v = rng.unit_vector();
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn child_streams_are_independent() {
        let mut root = SimRng::new(5);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        assert_ne!(c1.uniform(), c2.uniform());
    }

    #[test]
    fn chance_gate_boundaries() {
        let mut rng = SimRng::new(7);
        for _ in 0..1000 {
            assert!(!rng.chance(0.0), "the strict gate never fires at p = 0");
            assert!(rng.chance(1.0), "draws in [0, 1) always land below 1");
            assert!(rng.chance_inclusive(1.0));
        }
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(7);
        assert!(rng.gen_bool(1.0));
        assert!(!rng.gen_bool(0.0));
        // Out-of-range probabilities are clamped, not rejected.
        assert!(rng.gen_bool(2.5));
    }
}
