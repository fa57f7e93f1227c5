//! The per-step neighbor index.
//!
//! # Data layout
//!
//! An R-tree (via `rstar`) over 3-D cell positions, bulk-loaded once per step.
//! Each entry carries the cell's uid and phenotype so proximity-dependent
//! behaviors can filter candidates without touching the registry.
//!
//! # Visitor contract
//!
//! [`NeighborIndex::for_each_neighbor`] invokes the visitor once per candidate
//! within the squared-radius bound, in no particular order.  The querying
//! cell's own entry is **included** — visitors that need to exclude it filter
//! by uid, and visitors that queried with a bound larger than their true
//! interest radius re-check `squared_distance` themselves.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use cell_core::{CellUid, Real3};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 3-D point with the owning cell's uid and
/// phenotype captured at build time.
#[derive(Clone)]
struct CellEntry {
    point: [f64; 3],
    uid: CellUid,
    phenotype: i32,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for CellEntry {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── NeighborHit ───────────────────────────────────────────────────────────────

/// One candidate delivered to a neighbor-query visitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborHit {
    /// Uid of the candidate cell.
    pub uid: CellUid,
    /// Phenotype of the candidate at index-build time.
    pub phenotype: i32,
    /// Position of the candidate at index-build time.
    pub position: Real3,
    /// Squared distance from the query origin to `position`.
    pub squared_distance: f64,
}

// ── NeighborIndex ─────────────────────────────────────────────────────────────

/// Read-only spatial index over a snapshot of cell positions.
///
/// Rebuilt by the step driver at the start of every step; queried (never
/// mutated) by behaviors during the step.
pub struct NeighborIndex {
    tree: RTree<CellEntry>,
}

impl NeighborIndex {
    /// An index with no entries.  Every query visits nothing.
    pub fn empty() -> Self {
        Self { tree: RTree::new() }
    }

    /// Bulk-load the index from `(uid, position, phenotype)` snapshots.
    pub fn build(entries: impl IntoIterator<Item = (CellUid, Real3, i32)>) -> Self {
        let entries: Vec<CellEntry> = entries
            .into_iter()
            .map(|(uid, position, phenotype)| CellEntry {
                point: position.to_array(),
                uid,
                phenotype,
            })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Invoke `visitor` once per indexed cell within `squared_radius` of
    /// `origin` (inclusive bound), in no guaranteed order.
    ///
    /// The entry at `origin` itself (if any) is delivered too; filtering it —
    /// and any phenotype or tighter-distance test — is the visitor's job.
    pub fn for_each_neighbor(
        &self,
        origin: Real3,
        squared_radius: f64,
        mut visitor: impl FnMut(&NeighborHit),
    ) {
        let q = origin.to_array();
        for entry in self.tree.locate_within_distance(q, squared_radius) {
            let position = Real3::from(entry.point);
            visitor(&NeighborHit {
                uid: entry.uid,
                phenotype: entry.phenotype,
                position,
                squared_distance: origin.squared_distance(position),
            });
        }
    }
}

impl Default for NeighborIndex {
    fn default() -> Self {
        Self::empty()
    }
}
