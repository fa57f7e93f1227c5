//! `CellStore` — the cell registry.
//!
//! # Uid stability
//!
//! Cells are appended and never reordered or erased, so a cell's uid equals
//! its index for the lifetime of the run.  Behaviors never remove cells —
//! only their own attachment to one — which keeps iteration simple and every
//! `CellUid` valid forever.
//!
//! # Deferred births
//!
//! New cells created during a step (divisions) are buffered by the driver and
//! registered here via [`CellStore::register`] only after every behavior has
//! run, guaranteeing a created cell is not visited until the subsequent step.

use cell_core::CellUid;

use crate::cell::Cell;

/// Registry of all cells in the simulation.
///
/// The `cells` vector is `pub` for direct indexed access on the driver's hot
/// path.  Do not reorder or truncate it — uid equals index.
#[derive(Default)]
pub struct CellStore {
    pub cells: Vec<Cell>,
}

impl CellStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a cell, assigning the next uid.  Returns the uid.
    pub fn register(&mut self, mut cell: Cell) -> CellUid {
        let uid = CellUid(self.cells.len() as u32);
        cell.set_uid(uid);
        self.cells.push(cell);
        uid
    }

    /// Number of registered cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Shared access by uid.
    pub fn get(&self, uid: CellUid) -> Option<&Cell> {
        self.cells.get(uid.index())
    }

    /// Exclusive access by uid.
    pub fn get_mut(&mut self, uid: CellUid) -> Option<&mut Cell> {
        self.cells.get_mut(uid.index())
    }

    /// Iterator over all cells in uid order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Snapshot of `(uid, position, phenotype)` for neighbor-index builds.
    pub fn spatial_snapshot(&self) -> impl Iterator<Item = (CellUid, cell_core::Real3, i32)> + '_ {
        self.cells.iter().map(|c| (c.uid(), c.position(), c.phenotype()))
    }
}
