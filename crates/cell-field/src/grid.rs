//! Named substance lattices.
//!
//! # Data layout
//!
//! Each substance is an independent cubic lattice of `resolution³` voxels
//! spanning the simulation domain, stored flat in x-fastest order:
//!
//! ```text
//! index = (iz * resolution + iy) * resolution + ix
//! ```
//!
//! Positions outside the domain clamp to the boundary voxel (closed domain,
//! matching the reference scenarios' zero-flux boundary setting).

use rustc_hash::FxHashMap;

use cell_core::{Real3, SubstanceId};

use crate::error::{FieldError, FieldResult};
use crate::rate::RateBuffer;

// ── Substance lattice ─────────────────────────────────────────────────────────

struct Substance {
    name: String,
    /// First-order decay constant, per simulated second.
    decay_rate: f64,
    /// Voxels per axis.
    resolution: usize,
    /// `resolution³` concentrations, x-fastest.
    data: Vec<f64>,
}

// ── SubstanceGrid ─────────────────────────────────────────────────────────────

/// Registry of extracellular substance fields over a cubic domain.
///
/// Substances are defined once at scenario setup; behaviors refer to them by
/// [`SubstanceId`] resolved through [`SubstanceGrid::id_of`].
pub struct SubstanceGrid {
    min_bound: f64,
    max_bound: f64,
    substances: Vec<Substance>,
    by_name: FxHashMap<String, SubstanceId>,
}

impl SubstanceGrid {
    /// An empty grid over `[min_bound, max_bound]³`.
    pub fn new(min_bound: f64, max_bound: f64) -> Self {
        Self {
            min_bound,
            max_bound,
            substances: Vec::new(),
            by_name: FxHashMap::default(),
        }
    }

    /// Define a substance lattice with `resolution` voxels per axis and a
    /// first-order `decay_rate`.
    pub fn define(
        &mut self,
        name: &str,
        decay_rate: f64,
        resolution: usize,
    ) -> FieldResult<SubstanceId> {
        if resolution == 0 {
            return Err(FieldError::ZeroResolution(resolution));
        }
        if self.by_name.contains_key(name) {
            return Err(FieldError::DuplicateSubstance(name.to_string()));
        }
        let id = SubstanceId(self.substances.len() as u16);
        self.substances.push(Substance {
            name: name.to_string(),
            decay_rate,
            resolution,
            data: vec![0.0; resolution * resolution * resolution],
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Resolve a substance name to its id.
    pub fn id_of(&self, name: &str) -> Option<SubstanceId> {
        self.by_name.get(name).copied()
    }

    /// Number of defined substances.
    pub fn substance_count(&self) -> usize {
        self.substances.len()
    }

    /// Name of a defined substance.
    pub fn name_of(&self, id: SubstanceId) -> Option<&str> {
        self.substances.get(id.index()).map(|s| s.name.as_str())
    }

    /// Concentration of `id` in the voxel containing `position`.
    pub fn concentration(&self, id: SubstanceId, position: Real3) -> FieldResult<f64> {
        let s = self
            .substances
            .get(id.index())
            .ok_or(FieldError::UndefinedSubstance(id))?;
        Ok(s.data[self.voxel_index(s.resolution, position)])
    }

    /// Total amount of `id` summed over all voxels.
    pub fn total(&self, id: SubstanceId) -> FieldResult<f64> {
        let s = self
            .substances
            .get(id.index())
            .ok_or(FieldError::UndefinedSubstance(id))?;
        Ok(s.data.iter().sum())
    }

    /// Drain `buffer` into the lattices, integrating each rate over `dt`
    /// simulated seconds.
    ///
    /// All of the step's adjustments to a voxel are summed *before* the
    /// zero floor applies, so the accumulated effect is independent of the
    /// order adjustments were recorded.  Uptake can still not drive a voxel
    /// negative: the post-sum concentration floors at zero.
    pub fn flush(&mut self, buffer: &mut RateBuffer, dt: f64) -> FieldResult<()> {
        let mut deltas: FxHashMap<(SubstanceId, usize), f64> = FxHashMap::default();
        for adj in buffer.adjustments.drain(..) {
            let s = self
                .substances
                .get(adj.substance.index())
                .ok_or(FieldError::UndefinedSubstance(adj.substance))?;
            let idx = voxel_index_in(self.min_bound, self.max_bound, s.resolution, adj.position);
            *deltas.entry((adj.substance, idx)).or_insert(0.0) += adj.rate * dt;
        }
        for ((substance, idx), delta) in deltas {
            let v = &mut self.substances[substance.index()].data[idx];
            *v = (*v + delta).max(0.0);
        }
        Ok(())
    }

    /// Apply first-order decay to every voxel of every substance:
    /// `c ← c · (1 − decay_rate · dt)`, floored at zero.
    pub fn decay(&mut self, dt: f64) {
        for s in &mut self.substances {
            let factor = (1.0 - s.decay_rate * dt).max(0.0);
            if factor == 1.0 {
                continue;
            }
            #[cfg(feature = "parallel")]
            {
                use rayon::prelude::*;
                s.data.par_iter_mut().for_each(|c| *c *= factor);
            }
            #[cfg(not(feature = "parallel"))]
            for c in &mut s.data {
                *c *= factor;
            }
        }
    }

    #[inline]
    fn voxel_index(&self, resolution: usize, position: Real3) -> usize {
        voxel_index_in(self.min_bound, self.max_bound, resolution, position)
    }
}

/// Map a position to its flat voxel index, clamping to the boundary voxel on
/// each axis.
fn voxel_index_in(min_bound: f64, max_bound: f64, resolution: usize, p: Real3) -> usize {
    let size = (max_bound - min_bound) / resolution as f64;
    let axis = |v: f64| -> usize {
        let i = ((v - min_bound) / size).floor();
        (i.max(0.0) as usize).min(resolution - 1)
    };
    (axis(p.z) * resolution + axis(p.y)) * resolution + axis(p.x)
}
