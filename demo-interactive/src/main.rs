//! Interactive Forest Fire Demo
//!
//! A terminal front end for the fire automaton. Input that a windowed front
//! end would get from clicks and buttons is typed as commands instead.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive
//! ```
//!
//! # Commands
//!
//! - `step [n]` - Advance n ticks even while paused (default 1)
//! - `run [n]` - Advance n frames; does nothing while paused (default 10)
//! - `pause` - Toggle pause/resume
//! - `map` - Draw the grid
//! - `status` - Show cell counts and tick
//! - `cell <x> <y>` - Show a cell and its burn timer
//! - `ignite <x> <y>` - Set a cell on fire (right click)
//! - `plant <x> <y>` - Plant a tree (left click)
//! - `click <px> <py>` / `rclick <px> <py>` - Left/right click at a world position
//! - `trees [density]` - Plant trees at random ("Random Trees" button)
//! - `prob [p]` - Show or change the grass ignition probability
//! - `rain` - Turn burnt cells back into grass ("Make It Rain" button)
//! - `reset` - Start over with an all-grass grid
//! - `help` - Show available commands
//! - `quit` - Exit

use forest_fire_core::{Action, Cell, FireSimulation, Probability, SimulationConfig};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Smaller than the windowed default so the map fits a terminal
const DEFAULT_WORLD_WIDTH: u32 = 400;
const DEFAULT_WORLD_HEIGHT: u32 = 200;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║          Forest Fire Simulation - Interactive Demo        ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    let config =
        SimulationConfig::default().with_world_size(DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT);
    let mut sim = match FireSimulation::new(config) {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("Failed to create simulation: {e}");
            return;
        }
    };
    let mut paused = false;

    println!(
        "Created {}x{} grid of grass. Use 'trees' to plant and 'ignite <x> <y>' to start a fire.",
        sim.grid().cols(),
        sim.grid().rows()
    );

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create readline: {}", e);
            return;
        }
    };

    println!("\nType 'help' for available commands.\n");

    loop {
        let prompt = if paused { "fire (paused)> " } else { "fire> " };
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let parts: Vec<&str> = line.split_whitespace().collect();

                if parts.is_empty() {
                    continue;
                }

                match parts[0].to_lowercase().as_str() {
                    "step" | "s" => {
                        let count = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(1);
                        step_simulation(&mut sim, count);
                    }
                    "run" => {
                        let count = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(10);
                        if paused {
                            println!("Paused. Use 'pause' to resume or 'step' to force a tick.");
                        } else {
                            step_simulation(&mut sim, count);
                        }
                    }
                    "pause" | "p" => {
                        paused = !paused;
                        println!("{}", if paused { "Paused." } else { "Resumed." });
                    }
                    "map" | "m" => show_map(&sim),
                    "status" | "st" => show_status(&sim, paused),
                    "cell" | "c" => match parse_xy(&parts) {
                        Some((x, y)) => show_cell(&sim, x, y),
                        None => println!("Usage: cell <x> <y>"),
                    },
                    "ignite" | "i" => match parse_xy(&parts) {
                        Some((x, y)) => apply(&mut sim, Action::Ignite { x, y }),
                        None => println!("Usage: ignite <x> <y>"),
                    },
                    "plant" | "t" => match parse_xy(&parts) {
                        Some((x, y)) => apply(&mut sim, Action::PlantTree { x, y }),
                        None => println!("Usage: plant <x> <y>"),
                    },
                    "click" | "rclick" => {
                        let right = parts[0].eq_ignore_ascii_case("rclick");
                        let Some((px, py)) = parse_xy(&parts) else {
                            println!("Usage: {} <px> <py>  (world coordinates)", parts[0]);
                            continue;
                        };
                        click(&mut sim, px, py, right);
                    }
                    "trees" | "random" => {
                        let density = match parts.get(1) {
                            Some(s) => match parse_probability("density", s) {
                                Ok(p) => p,
                                Err(e) => {
                                    println!("Invalid density '{s}': {e}");
                                    continue;
                                }
                            },
                            None => sim.config().tree_density,
                        };
                        apply(&mut sim, Action::ScatterTrees { density });
                        println!("Trees: {}", sim.stats().counts.tree);
                    }
                    "prob" | "grass" => match parts.get(1) {
                        Some(s) => match parse_probability("grass_ignition_probability", s) {
                            Ok(p) => {
                                sim.set_grass_ignition_probability(p);
                                println!("Grass ignition probability: {p}");
                            }
                            Err(e) => println!("Invalid probability '{s}': {e}"),
                        },
                        None => println!(
                            "Grass ignition probability: {}",
                            sim.grass_ignition_probability()
                        ),
                    },
                    "rain" => {
                        let burnt = sim.stats().counts.burnt;
                        apply(&mut sim, Action::MakeItRain);
                        println!("Rain cleared {} burnt cell(s).", burnt);
                    }
                    "reset" | "r" => {
                        sim.reset();
                        info!("Grid reset by user");
                        println!(
                            "Simulation reset! {}x{} grid of grass.",
                            sim.grid().cols(),
                            sim.grid().rows()
                        );
                    }
                    "help" | "?" => show_help(),
                    "quit" | "q" | "exit" => {
                        println!("Goodbye!");
                        break;
                    }
                    _ => println!(
                        "Unknown command: {}. Type 'help' for available commands.",
                        parts[0]
                    ),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
}

/// Parse `<x> <y>` from the first two arguments
fn parse_xy<T: std::str::FromStr>(parts: &[&str]) -> Option<(T, T)> {
    let x = parts.get(1)?.parse().ok()?;
    let y = parts.get(2)?.parse().ok()?;
    Some((x, y))
}

/// Parse a probability argument, reporting parse and range errors alike
fn parse_probability(name: &'static str, s: &str) -> Result<Probability, String> {
    let value = s.parse::<f64>().map_err(|e| e.to_string())?;
    Probability::new(name, value).map_err(|e| e.to_string())
}

fn apply(sim: &mut FireSimulation, action: Action) {
    match sim.apply(action) {
        Ok(()) => println!("Applied {action}."),
        Err(e) => println!("Ignored {action}: {e}"),
    }
}

/// Translate a click at world coordinates into a grid action
fn click(sim: &mut FireSimulation, px: u32, py: u32, right: bool) {
    let dims = match sim.config().dimensions() {
        Ok(dims) => dims,
        Err(e) => {
            println!("Invalid grid configuration: {e}");
            return;
        }
    };
    match dims.cell_at(px, py) {
        Some((x, y)) if right => apply(sim, Action::Ignite { x, y }),
        Some((x, y)) => apply(sim, Action::PlantTree { x, y }),
        None => println!("Click ({px}, {py}) is outside the world."),
    }
}

fn step_simulation(sim: &mut FireSimulation, count: u32) {
    println!("Stepping {} tick(s)...", count);

    for i in 0..count {
        let burning_before = sim.stats().counts.burning;
        let start = Instant::now();

        let summary = sim.update();

        let burning_after = sim.stats().counts.burning;
        let time = start.elapsed();

        if i == count - 1 || summary.ignitions > 0 || summary.burnouts > 0 {
            println!(
                "  Tick {}: Burning: {} → {}, Ignited: {}, Burnt out: {}, Time: {}µs",
                sim.tick(),
                burning_before,
                burning_after,
                summary.ignitions,
                summary.burnouts,
                time.as_micros()
            );
        }
    }
    println!("Done.");
}

fn show_map(sim: &FireSimulation) {
    let grid = sim.grid();
    let ruler: String = (0..grid.cols())
        .map(|x| char::from_digit((x % 10) as u32, 10).unwrap_or('?'))
        .collect();
    println!("    {ruler}");
    for (y, row) in grid.rows_iter().enumerate() {
        let line: String = row.iter().map(|c| c.glyph()).collect();
        println!("{y:3} {line}");
    }
    println!(
        "Legend: '{}' grass  '{}' tree  '{}' burning  '{}' burnt  '{}' empty",
        Cell::Grass.glyph(),
        Cell::Tree.glyph(),
        Cell::Burning.glyph(),
        Cell::Burnt.glyph(),
        Cell::Empty.glyph()
    );
}

fn show_status(sim: &FireSimulation, paused: bool) {
    let stats = sim.stats();
    println!("\n═══════════════ SIMULATION STATUS ═══════════════");
    println!("Tick:              {}", stats.tick);
    println!("State:             {}", if paused { "paused" } else { "running" });
    println!("Grid:              {}x{}", sim.grid().cols(), sim.grid().rows());
    println!("Grass ignition p:  {}", sim.grass_ignition_probability());
    println!("Cells:             {}", stats.counts);
    println!("Total ignitions:   {}", stats.total_ignitions);
    println!("Total burnouts:    {}", stats.total_burnouts);
    println!(
        "Fire affected:     {:.1}%",
        stats.counts.fire_affected_fraction() * 100.0
    );
    println!("Actions recorded:  {}", sim.actions().history_len());
    println!("══════════════════════════════════════════════════\n");
}

fn show_cell(sim: &FireSimulation, x: usize, y: usize) {
    let grid = sim.grid();
    match grid.get(x, y) {
        Ok(cell) => {
            let burning_neighbors = grid
                .neighbors4(x, y)
                .filter(|&(nx, ny)| grid.get(nx, ny) == Ok(Cell::Burning))
                .count();
            println!("Cell ({x}, {y}): {cell}");
            if let Some(remaining) = grid.burn_timer(x, y) {
                println!("  Burn timer: {remaining} tick(s) left");
            }
            println!("  Burning neighbours: {burning_neighbors}");
        }
        Err(e) => println!("{e}"),
    }
}

fn show_help() {
    println!("\n═══════════════ AVAILABLE COMMANDS ═══════════════");
    println!("  step [n], s [n]      - Advance n ticks, even while paused (default 1)");
    println!("  run [n]              - Advance n frames unless paused (default 10)");
    println!("  pause, p             - Toggle pause/resume");
    println!("  map, m               - Draw the grid");
    println!("  status, st           - Show simulation status");
    println!("  cell <x> <y>, c      - Show one cell and its burn timer");
    println!("  ignite <x> <y>, i    - Set a cell on fire");
    println!("  plant <x> <y>, t     - Plant a tree");
    println!("  click <px> <py>      - Left click at world position (plant a tree)");
    println!("  rclick <px> <py>     - Right click at world position (start a fire)");
    println!("  trees [density]      - Plant trees at random (default density from config)");
    println!("  prob [p]             - Show or set the grass ignition probability");
    println!("  rain                 - Make it rain: burnt cells become grass");
    println!("  reset, r             - Reset to an all-grass grid");
    println!("  help, ?              - Show this help");
    println!("  quit, q              - Exit");
    println!("══════════════════════════════════════════════════\n");
}
