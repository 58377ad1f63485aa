use clap::Parser;
use forest_fire_core::{
    Action, Cell, FireSimError, FireSimulation, Grid, Probability, SimulationConfig, Simulator,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Forest fire cellular automaton, run without a display
#[derive(Parser, Debug)]
#[command(name = "forest-fire-demo")]
#[command(about = "Forest fire cellular automaton demo", long_about = None)]
struct Args {
    /// Number of ticks to run (stops early once the fire is out)
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,

    /// World width in world units
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// World height in world units
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Cell edge length in world units
    #[arg(long, default_value_t = 10)]
    cell_size: u32,

    /// Ticks a cell burns before turning to ash
    #[arg(short, long, default_value_t = 5)]
    burn_duration: u32,

    /// Chance per tick that grass next to a fire ignites (0-1)
    #[arg(short = 'g', long, default_value_t = 0.1)]
    grass_probability: f64,

    /// Share of cells planted with trees before the fire starts (0-1)
    #[arg(short = 'd', long, default_value_t = 0.1)]
    tree_density: f64,

    /// Random seed (omit for a different run every time)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Cell to ignite as `x,y`; may be repeated (default: grid centre)
    #[arg(short, long, value_parser = parse_coord)]
    ignite: Vec<(usize, usize)>,

    /// Report interval in ticks
    #[arg(short, long, default_value_t = 10)]
    report_interval: u64,

    /// Print the final grid
    #[arg(long)]
    print_grid: bool,

    /// Run validation scenarios instead of a simulation
    #[arg(short, long)]
    validate: bool,
}

fn parse_coord(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok((x, y))
}

fn build_config(args: &Args) -> Result<SimulationConfig, FireSimError> {
    let mut config = SimulationConfig::default()
        .with_world_size(args.width, args.height)
        .with_cell_size(args.cell_size)
        .with_burn_duration(args.burn_duration)
        .with_grass_ignition_probability(args.grass_probability)?
        .with_tree_density(args.tree_density)?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config.validate()?;
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    if args.validate {
        return match run_validation_tests() {
            Ok(0) => ExitCode::SUCCESS,
            Ok(failed) => {
                eprintln!("{failed} validation scenario(s) failed");
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Validation aborted: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<(), FireSimError> {
    println!("=== Forest Fire Demo ===\n");

    let config = build_config(args)?;
    let mut sim = FireSimulation::new(config)?;

    let (rows, cols) = (sim.grid().rows(), sim.grid().cols());
    println!(
        "Grid: {}x{} cells, burn duration {} ticks, grass ignition p={}",
        cols,
        rows,
        sim.config().burn_duration,
        sim.grass_ignition_probability()
    );

    sim.scatter_trees()?;
    println!(
        "Planted {} trees (density {})",
        sim.stats().counts.tree,
        sim.config().tree_density
    );

    let ignitions = if args.ignite.is_empty() {
        vec![(cols / 2, rows / 2)]
    } else {
        args.ignite.clone()
    };
    for (x, y) in ignitions {
        sim.submit(Action::Ignite { x, y });
    }

    println!("\nRunning simulation...\n");
    println!(" Tick | Burning | Burnt | Trees | Grass | Ignitions");
    println!("------|---------|-------|-------|-------|----------");

    let report = |sim: &FireSimulation| {
        let stats = sim.stats();
        println!(
            "{:5} | {:7} | {:5} | {:5} | {:5} | {:9}",
            stats.tick,
            stats.counts.burning,
            stats.counts.burnt,
            stats.counts.tree,
            stats.counts.grass,
            stats.total_ignitions
        );
    };

    let interval = args.report_interval.max(1);
    while sim.tick() < args.ticks {
        sim.update();
        if sim.tick() % interval == 0 {
            report(&sim);
        }
        if sim.stats().counts.burning == 0 {
            break;
        }
    }
    report(&sim);

    let stats = sim.stats();
    println!("\n=== Simulation Complete ===");
    println!("Ticks run: {}", stats.tick);
    println!("Cells ignited by spread: {}", stats.total_ignitions);
    println!("Cells burned out: {}", stats.total_burnouts);
    println!(
        "Area affected: {:.1}%",
        stats.counts.fire_affected_fraction() * 100.0
    );

    if args.print_grid {
        println!("\n{}", sim.grid());
    }
    Ok(())
}

/// Print a PASS/FAIL line and return 1 on failure
fn check(passed: bool, pass_msg: &str, fail_msg: &str) -> usize {
    if passed {
        println!("  ✓ PASS: {pass_msg}");
        0
    } else {
        println!("  ✗ FAIL: {fail_msg}");
        1
    }
}

/// Run the reference scenarios; returns the number that failed
fn run_validation_tests() -> Result<usize, FireSimError> {
    println!("\n=== Running Validation Tests ===\n");
    let mut failed = 0;

    println!("Test 1: Grass with zero ignition probability");
    let mut grid = Grid::with_dimensions(5, 5).with_burn_duration(5);
    grid.ignite(2, 2)?;
    let mut sim = Simulator::seeded(Probability::ZERO, 0);
    let mut still_burning = true;
    for _ in 0..4 {
        grid = sim.step(&grid);
        still_burning &= grid.get(2, 2)? == Cell::Burning;
    }
    grid = sim.step(&grid);
    let burnt = grid.get(2, 2)? == Cell::Burnt;
    let grass_untouched = grid.count(Cell::Grass) == 24;
    failed += check(
        still_burning && burnt && grass_untouched,
        "Burns for 5 ticks, neighbours untouched",
        &format!("burning={still_burning} burnt={burnt} grass={grass_untouched}"),
    );

    println!("\nTest 2: Trees ignite from an adjacent fire");
    let mut grid = Grid::new(5, 5, Cell::Tree);
    grid.ignite(2, 2)?;
    let next = Simulator::seeded(Probability::ZERO, 0).step(&grid);
    let mut all_lit = true;
    for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
        all_lit &= next.get(x, y)? == Cell::Burning;
    }
    failed += check(
        all_lit,
        "All four orthogonal neighbours burning",
        "Expected all four neighbours to ignite",
    );

    println!("\nTest 3: Fire front advances one cell per tick");
    let mut grid = Grid::new(1, 10, Cell::Tree);
    grid.ignite(0, 0)?;
    let mut sim = Simulator::seeded(Probability::ZERO, 0);
    for _ in 0..3 {
        grid = sim.step(&grid);
    }
    let front = grid.get(3, 0)? == Cell::Burning && grid.get(4, 0)? == Cell::Tree;
    failed += check(
        front,
        "Front at x=3 after 3 ticks",
        &format!("Front position wrong\n{grid}"),
    );

    println!("\n=== Validation Complete: {} of 3 passed ===", 3 - failed);
    Ok(failed)
}
