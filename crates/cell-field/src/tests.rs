//! Unit tests for cell-field.

#[cfg(test)]
mod grid {
    use cell_core::{Real3, SubstanceId};

    use crate::{FieldError, RateBuffer, SubstanceGrid};

    fn tgf_grid() -> (SubstanceGrid, SubstanceId) {
        let mut grid = SubstanceGrid::new(-50.0, 50.0);
        let id = grid.define("TGF", 0.0, 10).unwrap();
        (grid, id)
    }

    #[test]
    fn define_and_resolve() {
        let (grid, id) = tgf_grid();
        assert_eq!(grid.id_of("TGF"), Some(id));
        assert_eq!(grid.name_of(id), Some("TGF"));
        assert_eq!(grid.substance_count(), 1);
        assert!(grid.id_of("EGF").is_none());
    }

    #[test]
    fn duplicate_define_rejected() {
        let (mut grid, _) = tgf_grid();
        assert!(matches!(
            grid.define("TGF", 0.0, 10),
            Err(FieldError::DuplicateSubstance(_))
        ));
    }

    #[test]
    fn zero_resolution_rejected() {
        let mut grid = SubstanceGrid::new(-1.0, 1.0);
        assert!(matches!(grid.define("X", 0.0, 0), Err(FieldError::ZeroResolution(0))));
    }

    #[test]
    fn flush_accumulates_at_position() {
        let (mut grid, id) = tgf_grid();
        let mut buf = RateBuffer::new();
        let p = Real3::new(1.0, 2.0, 3.0);
        buf.adjust(id, p, 0.5);
        buf.adjust(id, p, 0.25);
        grid.flush(&mut buf, 2.0).unwrap();

        assert!(buf.is_empty());
        assert_eq!(grid.concentration(id, p).unwrap(), 1.5); // (0.5 + 0.25) * dt
    }

    #[test]
    fn flush_is_order_independent() {
        let p = Real3::ZERO;
        let rates = [0.3, -0.1, 0.7, 0.2];

        let (mut g1, id1) = tgf_grid();
        let mut b1 = RateBuffer::new();
        for r in rates {
            b1.adjust(id1, p, r);
        }
        g1.flush(&mut b1, 1.0).unwrap();

        let (mut g2, id2) = tgf_grid();
        let mut b2 = RateBuffer::new();
        for r in rates.iter().rev() {
            b2.adjust(id2, p, *r);
        }
        g2.flush(&mut b2, 1.0).unwrap();

        assert_eq!(
            g1.concentration(id1, p).unwrap(),
            g2.concentration(id2, p).unwrap()
        );
    }

    #[test]
    fn opposing_rates_cancel_regardless_of_order() {
        // The zero floor must apply to the per-voxel sum, not to each
        // adjustment as it lands: an uptake recorded before a matching
        // production would otherwise clamp early and leave a surplus.
        for rates in [[5.0, -5.0], [-5.0, 5.0]] {
            let (mut grid, id) = tgf_grid();
            let mut buf = RateBuffer::new();
            for r in rates {
                buf.adjust(id, Real3::ZERO, r);
            }
            grid.flush(&mut buf, 1.0).unwrap();
            assert_eq!(grid.concentration(id, Real3::ZERO).unwrap(), 0.0);
        }
    }

    #[test]
    fn net_negative_sum_on_a_charged_voxel_subtracts_before_flooring() {
        let (mut grid, id) = tgf_grid();
        let mut buf = RateBuffer::new();
        buf.adjust(id, Real3::ZERO, 3.0);
        grid.flush(&mut buf, 1.0).unwrap();

        buf.adjust(id, Real3::ZERO, -2.0);
        buf.adjust(id, Real3::ZERO, 1.0);
        grid.flush(&mut buf, 1.0).unwrap();
        assert_eq!(grid.concentration(id, Real3::ZERO).unwrap(), 2.0);
    }

    #[test]
    fn uptake_floors_at_zero() {
        let (mut grid, id) = tgf_grid();
        let mut buf = RateBuffer::new();
        buf.adjust(id, Real3::ZERO, -5.0);
        grid.flush(&mut buf, 1.0).unwrap();
        assert_eq!(grid.concentration(id, Real3::ZERO).unwrap(), 0.0);
    }

    #[test]
    fn out_of_domain_position_clamps_to_boundary_voxel() {
        let (mut grid, id) = tgf_grid();
        let mut buf = RateBuffer::new();
        buf.adjust(id, Real3::new(999.0, 999.0, 999.0), 1.0);
        grid.flush(&mut buf, 1.0).unwrap();
        assert_eq!(grid.concentration(id, Real3::new(49.9, 49.9, 49.9)).unwrap(), 1.0);
    }

    #[test]
    fn undefined_substance_errors_at_flush() {
        let (mut grid, _) = tgf_grid();
        let mut buf = RateBuffer::new();
        buf.adjust(SubstanceId(99), Real3::ZERO, 1.0);
        assert!(matches!(
            grid.flush(&mut buf, 1.0),
            Err(FieldError::UndefinedSubstance(SubstanceId(99)))
        ));
    }

    #[test]
    fn decay_scales_every_voxel() {
        let mut grid = SubstanceGrid::new(-50.0, 50.0);
        let id = grid.define("TGF", 0.1, 4).unwrap();
        let mut buf = RateBuffer::new();
        buf.adjust(id, Real3::new(-40.0, 0.0, 0.0), 2.0);
        buf.adjust(id, Real3::new(40.0, 0.0, 0.0), 4.0);
        grid.flush(&mut buf, 1.0).unwrap();

        grid.decay(1.0); // factor 0.9
        let total = grid.total(id).unwrap();
        assert!((total - 5.4).abs() < 1e-12, "got {total}");
    }

    #[test]
    fn overdamped_decay_floors_at_zero() {
        let mut grid = SubstanceGrid::new(-1.0, 1.0);
        let id = grid.define("X", 10.0, 2).unwrap();
        let mut buf = RateBuffer::new();
        buf.adjust(id, Real3::ZERO, 1.0);
        grid.flush(&mut buf, 1.0).unwrap();

        grid.decay(1.0); // 1 - 10*1 < 0 → factor clamps to 0
        assert_eq!(grid.total(id).unwrap(), 0.0);
    }
}
