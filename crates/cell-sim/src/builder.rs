//! Fluent builder for constructing a [`Simulation`].

use cell_agent::{Cell, CellStore};
use cell_core::{Param, Real3};
use cell_field::SubstanceGrid;

use crate::{SimError, SimResult, Simulation};

/// A substance definition queued on the builder.
struct SubstanceDef {
    name: String,
    decay_rate: f64,
    resolution: usize,
}

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - [`Param`] — domain bounds, total steps, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                |
/// |--------------------|----------------------------------------|
/// | `.cells(v)`        | Empty registry                         |
/// | `.positions(v)`    | Positions the cells already carry      |
/// | `.substance(..)`   | No substance lattices                  |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(param)
///     .cells(cells)
///     .substance("chemokine", 0.01, 16)
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    param: Param,
    cells: Vec<Cell>,
    positions: Option<Vec<Real3>>,
    substances: Vec<SubstanceDef>,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(param: Param) -> Self {
        Self {
            param,
            cells: Vec::new(),
            positions: None,
            substances: Vec::new(),
        }
    }

    /// Supply the initial cell population.  Replaces any previously
    /// supplied cells.
    pub fn cells(mut self, cells: Vec<Cell>) -> Self {
        self.cells = cells;
        self
    }

    /// Append a single cell to the initial population.
    pub fn cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Override the initial position of each cell (must match the cell
    /// count).  Useful when cells come from a template constructor and
    /// positions from a separate placement pass.
    pub fn positions(mut self, positions: Vec<Real3>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Define a substance lattice with `resolution` voxels per axis and a
    /// first-order `decay_rate`.  Ids are assigned in definition order,
    /// starting at zero.
    pub fn substance(mut self, name: &str, decay_rate: f64, resolution: usize) -> Self {
        self.substances.push(SubstanceDef {
            name: name.to_string(),
            decay_rate,
            resolution,
        });
        self
    }

    /// Validate inputs, build the substance grid and registry, and return a
    /// ready-to-run [`Simulation`].
    pub fn build(self) -> SimResult<Simulation> {
        self.param.validate()?;

        // ── Validate and apply the optional position override ─────────────
        let mut cells = self.cells;
        if let Some(positions) = self.positions {
            if positions.len() != cells.len() {
                return Err(SimError::CellCountMismatch {
                    expected: cells.len(),
                    got: positions.len(),
                    what: "initial positions",
                });
            }
            for (cell, position) in cells.iter_mut().zip(positions) {
                cell.set_position(position);
            }
        }

        // ── Build the substance grid ──────────────────────────────────────
        let mut grid = SubstanceGrid::new(self.param.min_bound, self.param.max_bound);
        for def in self.substances {
            grid.define(&def.name, def.decay_rate, def.resolution)?;
        }

        // ── Register the initial population ───────────────────────────────
        let mut store = CellStore::new();
        for cell in cells {
            store.register(cell);
        }

        Ok(Simulation::assemble(self.param, store, grid))
    }
}
