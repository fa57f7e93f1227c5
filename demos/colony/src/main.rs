//! colony — a growing, migrating cell colony.
//!
//! Seeds a small population of cells in a cube.  Each cell grows until it
//! crosses a diameter threshold, then stochastically divides; daughters
//! inherit both behaviors and keep the colony compounding.  A slow random
//! walk spreads the colony through the domain.

use std::time::Instant;

use anyhow::Result;

use cell_agent::Cell;
use cell_behavior::{GrowthDivision, Migration};
use cell_core::{Param, SimRng, Step};
use cell_sim::{SimBuilder, SimObserver, seed};

// ── Constants ─────────────────────────────────────────────────────────────────

const CELL_COUNT: usize = 64;
const SEED: u64 = 42;
const TOTAL_STEPS: u64 = 200;

const INITIAL_DIAMETER: f64 = 7.5;
const DIVISION_THRESHOLD: f64 = 8.0;
const GROWTH_RATE: f64 = 15.0;
const DIVISION_PROBABILITY: f64 = 0.02;
const MIGRATION_RATE: f64 = 0.5;

// ── Progress observer ─────────────────────────────────────────────────────────

struct ProgressPrinter {
    interval: u64,
    peak_population: usize,
}

impl SimObserver for ProgressPrinter {
    fn on_step_end(&mut self, step: Step, ran: usize, population: usize) {
        self.peak_population = self.peak_population.max(population);
        if step.0.is_multiple_of(self.interval) {
            println!("{step}: {population} cells, ran {ran} units");
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== colony — rust_cell agent simulation ===");
    println!("Cells: {CELL_COUNT}  |  Steps: {TOTAL_STEPS}  |  Seed: {SEED}");
    println!();

    let param = Param {
        total_steps: TOTAL_STEPS,
        seed: SEED,
        ..Param::default()
    };

    // Seed the population in the central fifth of the domain.  The seeding
    // RNG is independent of the simulation's master stream.
    let extent = param.extent() / 10.0;
    let mut seed_rng = SimRng::new(SEED);
    let cells = seed::random_in_box(CELL_COUNT, -extent, extent, &mut seed_rng, |pos| {
        make_colony_cell(pos)
    });

    let mut sim = SimBuilder::new(param).cells(cells).build()?;

    let mut obs = ProgressPrinter { interval: 20, peak_population: 0 };
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  final population : {}", sim.cells.len());
    println!("  peak population  : {}", obs.peak_population);

    let total_volume: f64 = sim.cells.iter().map(Cell::volume).sum();
    let mean_diameter: f64 =
        sim.cells.iter().map(Cell::diameter).sum::<f64>() / sim.cells.len() as f64;
    println!("  total volume     : {total_volume:.1}");
    println!("  mean diameter    : {mean_diameter:.2}");

    println!();
    println!("{:<8} {:<10} {:<10} {:<24}", "Cell", "Diameter", "Units", "Position");
    println!("{}", "-".repeat(54));
    for cell in sim.cells.iter().take(10) {
        let p = cell.position();
        println!(
            "{:<8} {:<10.2} {:<10} ({:.1}, {:.1}, {:.1})",
            cell.uid().index(),
            cell.diameter(),
            cell.behavior_count(),
            p.x,
            p.y,
            p.z,
        );
    }

    Ok(())
}

fn make_colony_cell(pos: cell_core::Real3) -> Cell {
    let mut cell = Cell::at(pos);
    cell.set_diameter(INITIAL_DIAMETER);
    cell.add_behavior(Box::new(GrowthDivision::new(
        DIVISION_THRESHOLD,
        GROWTH_RATE,
        DIVISION_PROBABILITY,
    )))
    .expect("seed attachment cannot fail");
    cell.add_behavior(Box::new(Migration::new(MIGRATION_RATE, 1.0, false)))
        .expect("seed attachment cannot fail");
    cell
}
