//! Integration tests for fire spread across the grid
//!
//! These tests drive the public API the way a UI loop does: build a grid,
//! apply mutations, and step it repeatedly.

use approx::assert_abs_diff_eq;
use forest_fire_core::config::BURNING_DURATION;
use forest_fire_core::{Cell, CellCounts, Grid, Probability, Simulator};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// A mixed landscape with every state present, built from a seed
fn mixed_grid(seed: u64, rows: usize, cols: usize) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::with_dimensions(rows, cols);
    grid.scatter(0.4, Cell::Tree, &mut rng).unwrap();
    grid.scatter(0.05, Cell::Empty, &mut rng).unwrap();
    grid.scatter(0.05, Cell::Burnt, &mut rng).unwrap();
    grid.scatter(0.02, Cell::Burning, &mut rng).unwrap();
    grid
}

#[test]
fn test_step_keeps_timers_in_sync_with_burning_cells() {
    for seed in 0..20 {
        let mut grid = mixed_grid(seed, 24, 32);
        let mut sim = Simulator::seeded(Probability::new("p", 0.3).unwrap(), seed);
        for _ in 0..40 {
            grid = sim.step(&grid);
            assert_eq!((grid.rows(), grid.cols()), (24, 32));
            assert!(grid.timers_consistent(), "seed {seed}");
        }
    }
}

#[test]
fn test_step_registers_timers_for_raw_burning_cells() {
    let mut grid = Grid::with_dimensions(4, 4);
    grid.set(0, 0, Cell::Burning).unwrap();
    grid.set(3, 3, Cell::Burning).unwrap();
    assert!(!grid.timers_consistent());

    let next = Simulator::seeded(Probability::ZERO, 0).step(&grid);
    assert!(next.timers_consistent());
}

#[test]
fn test_tree_next_to_one_fire_always_ignites() {
    for seed in 0..50 {
        let mut grid = Grid::new(3, 3, Cell::Empty);
        grid.set(1, 1, Cell::Tree).unwrap();
        grid.ignite(1, 0).unwrap();
        let mut sim = Simulator::seeded(Probability::new("p", 0.5).unwrap(), seed);
        let next = sim.step(&grid);
        assert_eq!(next.get(1, 1).unwrap(), Cell::Burning, "seed {seed}");
    }
}

#[test]
fn test_grass_away_from_fire_never_ignites() {
    let mut grid = Grid::with_dimensions(9, 9);
    grid.ignite(0, 0).unwrap();
    // Firebreak so nothing can reach the far side
    for i in 0..9 {
        grid.set(2, i, Cell::Empty).unwrap();
    }
    let mut sim = Simulator::seeded(Probability::ONE, 5);
    for _ in 0..20 {
        grid = sim.step(&grid);
        for y in 0..9 {
            for x in 3..9 {
                assert_eq!(grid.get(x, y).unwrap(), Cell::Grass);
            }
        }
    }
}

#[test]
fn test_ignited_cell_burns_for_exact_duration() {
    for duration in [1, 2, 5, 9] {
        let mut grid = Grid::new(3, 3, Cell::Empty).with_burn_duration(duration);
        grid.ignite(1, 1).unwrap();
        let mut sim = Simulator::seeded(Probability::ZERO, 0);
        for tick in 1..duration {
            grid = sim.step(&grid);
            assert_eq!(grid.get(1, 1).unwrap(), Cell::Burning, "tick {tick}");
        }
        grid = sim.step(&grid);
        assert_eq!(grid.get(1, 1).unwrap(), Cell::Burnt);
    }
}

#[test]
fn test_spread_ignited_tree_burns_for_exact_duration() {
    let mut grid = Grid::new(1, 2, Cell::Tree);
    grid.ignite(0, 0).unwrap();
    let mut sim = Simulator::seeded(Probability::ZERO, 0);

    // (1, 0) catches fire on step 1 and must burn out on step 1 + duration
    grid = sim.step(&grid);
    assert_eq!(grid.get(1, 0).unwrap(), Cell::Burning);
    for _ in 1..BURNING_DURATION {
        grid = sim.step(&grid);
        assert_eq!(grid.get(1, 0).unwrap(), Cell::Burning);
    }
    grid = sim.step(&grid);
    assert_eq!(grid.get(1, 0).unwrap(), Cell::Burnt);
}

#[test]
fn test_extinguish_after_fire() {
    let mut grid = mixed_grid(9, 16, 16);
    let mut sim = Simulator::seeded(Probability::new("p", 0.2).unwrap(), 9);
    for _ in 0..12 {
        grid = sim.step(&grid);
    }
    let before = grid.clone();
    let burnt = before.count(Cell::Burnt);
    assert!(burnt > 0);

    assert_eq!(grid.extinguish_burnt(Cell::Grass), burnt);
    for y in 0..16 {
        for x in 0..16 {
            let old = before.get(x, y).unwrap();
            let new = grid.get(x, y).unwrap();
            if old == Cell::Burnt {
                assert_eq!(new, Cell::Grass);
            } else {
                assert_eq!(new, old);
            }
        }
    }
    assert!(grid.timers_consistent());
}

#[test]
fn test_create_then_get_returns_initial_state() {
    for initial in Cell::ALL {
        let grid = Grid::new(6, 9, initial);
        for y in 0..6 {
            for x in 0..9 {
                assert_eq!(grid.get(x, y).unwrap(), initial);
            }
        }
        assert!(grid.burn_timers().is_empty());
    }
}

#[test]
fn test_grass_scenario_with_zero_ignition_probability() {
    let mut grid = Grid::with_dimensions(5, 5).with_burn_duration(5);
    grid.ignite(2, 2).unwrap();
    let mut sim = Simulator::seeded(Probability::ZERO, 1234);

    for _ in 0..4 {
        grid = sim.step(&grid);
        assert_eq!(grid.get(2, 2).unwrap(), Cell::Burning);
        for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(grid.get(x, y).unwrap(), Cell::Grass);
        }
    }
    grid = sim.step(&grid);
    assert_eq!(grid.get(2, 2).unwrap(), Cell::Burnt);
    assert_eq!(grid.count(Cell::Grass), 24);
}

#[test]
fn test_tree_scenario_ignites_all_orthogonal_neighbors() {
    for seed in [0, 1, 99, 4242] {
        let mut grid = Grid::new(5, 5, Cell::Tree).with_burn_duration(5);
        grid.ignite(2, 2).unwrap();
        let mut sim = Simulator::seeded(Probability::new("p", 0.1).unwrap(), seed);
        let next = sim.step(&grid);
        for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(next.get(x, y).unwrap(), Cell::Burning);
        }
        for (x, y) in [(1, 1), (3, 3), (0, 2), (2, 4)] {
            assert_eq!(next.get(x, y).unwrap(), Cell::Tree);
        }
    }
}

#[test]
fn test_scatter_extremes() {
    let mut rng = StdRng::seed_from_u64(77);
    let mut grid = mixed_grid(3, 12, 12);
    let before = grid.clone();
    grid.scatter(0.0, Cell::Tree, &mut rng).unwrap();
    assert_eq!(grid, before);

    grid.scatter(1.0, Cell::Tree, &mut rng).unwrap();
    assert_eq!(grid.count(Cell::Tree), 144);
    assert!(grid.burn_timers().is_empty());
}

#[test]
fn test_scatter_density_is_roughly_respected() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut grid = Grid::with_dimensions(200, 200);
    grid.scatter(0.1, Cell::Tree, &mut rng).unwrap();
    let fraction = grid.count(Cell::Tree) as f64 / 40_000.0;
    assert_abs_diff_eq!(fraction, 0.1, epsilon = 0.01);
}

#[test]
fn test_same_seed_same_outcome() {
    let start = mixed_grid(31, 30, 30);
    let p = Probability::new("p", 0.35).unwrap();
    let mut a = Simulator::seeded(p, 8);
    let mut b = Simulator::seeded(p, 8);
    let (mut ga, mut gb) = (start.clone(), start);
    for _ in 0..25 {
        ga = a.step(&ga);
        gb = b.step(&gb);
        assert_eq!(ga, gb);
    }
}

#[test]
fn test_fire_eventually_burns_out() {
    let mut grid = mixed_grid(17, 20, 20);
    grid.ignite(10, 10).unwrap();
    let mut sim = Simulator::seeded(Probability::new("p", 0.1).unwrap(), 17);
    for _ in 0..500 {
        grid = sim.step(&grid);
        if grid.count(Cell::Burning) == 0 {
            break;
        }
    }
    let counts = CellCounts::from_grid(&grid);
    assert_eq!(counts.burning, 0);
    assert!(counts.burnt > 0);
    assert!(grid.burn_timers().is_empty());
}
