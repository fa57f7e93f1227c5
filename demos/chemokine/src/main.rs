//! chemokine — two cell populations coupled through a substance field.
//!
//! Producer cells sit on a central lattice and secrete a chemokine at a
//! constant rate.  Monocyte cells wander the domain, taking the chemokine
//! back up; a monocyte that reaches the domain boundary adheres there, stops
//! wandering, and keeps consuming in place.

use std::time::Instant;

use anyhow::Result;

use cell_agent::Cell;
use cell_behavior::{Migration, Secretion};
use cell_core::{Param, Real3, SimRng, Step};
use cell_sim::{SimBuilder, SimObserver, seed};

// ── Constants ─────────────────────────────────────────────────────────────────

const PRODUCERS_PER_AXIS: usize = 4; // 64 producers on a central lattice
const MONOCYTE_COUNT: usize = 120;
const SEED: u64 = 42;
const TOTAL_STEPS: u64 = 300;

const SUBSTANCE: &str = "chemokine";
const DECAY_RATE: f64 = 0.002;
const RESOLUTION: usize = 16;
const SECRETION_RATE: f64 = 1.0;
const UPTAKE_RATE: f64 = -0.3;

const PRODUCER_PHENOTYPE: i32 = 1;
const MONOCYTE_PHENOTYPE: i32 = 2;

const MONOCYTE_SPEED: f64 = 2.0;

// ── Progress observer ─────────────────────────────────────────────────────────

struct ProgressPrinter {
    interval: u64,
}

impl SimObserver for ProgressPrinter {
    fn on_step_end(&mut self, step: Step, ran: usize, population: usize) {
        if step.0.is_multiple_of(self.interval) {
            println!("{step}: {population} cells, ran {ran} units");
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== chemokine — rust_cell agent simulation ===");
    println!(
        "Producers: {}  |  Monocytes: {MONOCYTE_COUNT}  |  Steps: {TOTAL_STEPS}  |  Seed: {SEED}",
        PRODUCERS_PER_AXIS.pow(3)
    );
    println!();

    let param = Param {
        total_steps: TOTAL_STEPS,
        seed: SEED,
        ..Param::default()
    };

    let mut sim = SimBuilder::new(param.clone())
        .substance(SUBSTANCE, DECAY_RATE, RESOLUTION)
        .build()?;
    let substance = sim
        .grid
        .id_of(SUBSTANCE)
        .expect("defined just above");

    // Producers: fixed central lattice, secreting.
    for mut cell in seed::grid_3d(PRODUCERS_PER_AXIS, 10.0, Cell::at) {
        cell.set_phenotype(PRODUCER_PHENOTYPE);
        cell.add_behavior(Box::new(Secretion::new(substance, SECRETION_RATE)))?;
        sim.cells.register(cell);
    }

    // Monocytes: seeded uniformly, wandering until they hit the boundary.
    let mut seed_rng = SimRng::new(SEED);
    let margin = 5.0;
    let monocytes = seed::random_in_box(
        MONOCYTE_COUNT,
        param.min_bound + margin,
        param.max_bound - margin,
        &mut seed_rng,
        |pos| make_monocyte(pos, substance),
    );
    for cell in monocytes {
        sim.cells.register(cell);
    }

    let t0 = Instant::now();
    sim.run(&mut ProgressPrinter { interval: 50 })?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  total {SUBSTANCE} : {:.1}", sim.grid.total(substance)?);
    println!(
        "  at origin        : {:.4}",
        sim.grid.concentration(substance, Real3::ZERO)?
    );

    // A monocyte that adhered has dropped its migration unit.
    let adhered = sim
        .cells
        .iter()
        .filter(|c| c.phenotype() == MONOCYTE_PHENOTYPE)
        .filter(|c| c.behavior_count() == 1)
        .count();
    println!("  adhered monocytes: {adhered} / {MONOCYTE_COUNT}");

    Ok(())
}

fn make_monocyte(pos: Real3, substance: cell_core::SubstanceId) -> Cell {
    let mut cell = Cell::at(pos);
    cell.set_diameter(5.0);
    cell.set_phenotype(MONOCYTE_PHENOTYPE);
    cell.add_behavior(Box::new(Migration::new(MONOCYTE_SPEED, 1.0, true)))
        .expect("seed attachment cannot fail");
    cell.add_behavior(Box::new(Secretion::new(substance, UPTAKE_RATE)))
        .expect("seed attachment cannot fail");
    cell
}
