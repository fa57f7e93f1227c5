//! Unit tests for the neighbor index.

#[cfg(test)]
mod index {
    use cell_core::{CellUid, Real3};

    use crate::NeighborIndex;

    fn three_cells() -> NeighborIndex {
        NeighborIndex::build([
            (CellUid(0), Real3::new(0.0, 0.0, 0.0), 1),
            (CellUid(1), Real3::new(3.0, 0.0, 0.0), 1),
            (CellUid(2), Real3::new(0.0, 10.0, 0.0), 2),
        ])
    }

    #[test]
    fn empty_index_visits_nothing() {
        let idx = NeighborIndex::empty();
        let mut count = 0;
        idx.for_each_neighbor(Real3::ZERO, 1e9, |_| count += 1);
        assert!(idx.is_empty());
        assert_eq!(count, 0);
    }

    #[test]
    fn radius_bound_is_squared_and_inclusive() {
        let idx = three_cells();
        let mut hits = vec![];
        // radius 3 → squared 9; cell 1 sits exactly on the bound.
        idx.for_each_neighbor(Real3::ZERO, 9.0, |h| hits.push(h.uid));
        hits.sort();
        assert_eq!(hits, vec![CellUid(0), CellUid(1)]);
    }

    #[test]
    fn query_origin_entry_is_included() {
        let idx = three_cells();
        let mut saw_self = false;
        idx.for_each_neighbor(Real3::ZERO, 1.0, |h| {
            if h.uid == CellUid(0) {
                saw_self = true;
                assert_eq!(h.squared_distance, 0.0);
            }
        });
        assert!(saw_self, "the index must not silently drop the querying cell");
    }

    #[test]
    fn hit_carries_snapshot_phenotype_and_distance() {
        let idx = three_cells();
        let mut found = None;
        idx.for_each_neighbor(Real3::ZERO, 200.0, |h| {
            if h.uid == CellUid(2) {
                found = Some((h.phenotype, h.squared_distance));
            }
        });
        assert_eq!(found, Some((2, 100.0)));
    }

    #[test]
    fn out_of_radius_cells_not_visited() {
        let idx = three_cells();
        let mut hits = 0;
        idx.for_each_neighbor(Real3::new(0.0, 10.0, 0.0), 4.0, |h| {
            assert_eq!(h.uid, CellUid(2));
            hits += 1;
        });
        assert_eq!(hits, 1);
    }

    #[test]
    fn build_len() {
        assert_eq!(three_cells().len(), 3);
    }
}
