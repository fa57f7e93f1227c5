//! Population seeding helpers.
//!
//! Each helper calls a caller-supplied constructor once per position, so the
//! same placement routine serves any mix of cell templates:
//!
//! ```rust,ignore
//! let mut rng = SimRng::new(param.seed);
//! let cells = seed::random_in_box(100, -20.0, 20.0, &mut rng, |pos| {
//!     let mut cell = Cell::at(pos);
//!     cell.set_diameter(7.5);
//!     cell.add_behavior(Box::new(GrowthDivision::default())).unwrap();
//!     cell
//! });
//! ```

use cell_agent::Cell;
use cell_core::{Real3, SimRng};

/// Construct `n` cells uniformly distributed in the axis-aligned cube
/// `[lo, hi]³`.
pub fn random_in_box<F>(n: usize, lo: f64, hi: f64, rng: &mut SimRng, mut make: F) -> Vec<Cell>
where
    F: FnMut(Real3) -> Cell,
{
    (0..n).map(|_| make(rng.uniform_box(lo, hi))).collect()
}

/// Construct `n` cells uniformly distributed inside the ball of `radius`
/// around `center`.
///
/// Radius is drawn as `radius * u^(1/3)` so density is uniform in volume,
/// not biased toward the center.
pub fn random_in_sphere<F>(
    n: usize,
    center: Real3,
    radius: f64,
    rng: &mut SimRng,
    mut make: F,
) -> Vec<Cell>
where
    F: FnMut(Real3) -> Cell,
{
    (0..n)
        .map(|_| {
            let r = radius * rng.uniform().cbrt();
            make(center + rng.unit_vector() * r)
        })
        .collect()
}

/// Construct `per_axis³` cells on a cubic lattice with `spacing` between
/// adjacent cells, centered on the origin.
pub fn grid_3d<F>(per_axis: usize, spacing: f64, mut make: F) -> Vec<Cell>
where
    F: FnMut(Real3) -> Cell,
{
    let offset = (per_axis as f64 - 1.0) * spacing / 2.0;
    let mut cells = Vec::with_capacity(per_axis * per_axis * per_axis);
    for k in 0..per_axis {
        for j in 0..per_axis {
            for i in 0..per_axis {
                let pos = Real3::new(
                    i as f64 * spacing - offset,
                    j as f64 * spacing - offset,
                    k as f64 * spacing - offset,
                );
                cells.push(make(pos));
            }
        }
    }
    cells
}
