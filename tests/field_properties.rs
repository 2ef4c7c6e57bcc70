use ant_colony_sim::prelude::*;
use proptest::prelude::*;

fn engine(evaporation_rate: f32, diffusion_rate: f32) -> FieldEngine {
    FieldEngine {
        max: 1000.0,
        evaporation_rate,
        diffusion_rate,
        epsilon: 0.1,
    }
}

prop_compose! {
    fn arb_field(max_level: f32)(
        width in 1usize..8,
        height in 1usize..8,
    )(
        levels in prop::collection::vec(
            prop_oneof![Just(0.0f32), Just(max_level), 0.0f32..max_level],
            width * height * 2,
        ),
        width in Just(width),
        height in Just(height),
    ) -> Grid {
        let field = engine(0.0, 0.0);
        let mut grid = Grid::new(width, height).unwrap();
        for (i, pair) in levels.chunks(2).enumerate() {
            let pos = grid.position_of(i);
            field.deposit(&mut grid, pos, Pheromone::Food, pair[0]);
            field.deposit(&mut grid, pos, Pheromone::Home, pair[1]);
        }
        grid
    }
}

/// Copy of `grid` flipped left to right
fn mirrored(grid: &Grid) -> Grid {
    let field = engine(0.0, 0.0);
    let mut flipped = Grid::new(grid.width(), grid.height()).unwrap();
    for (i, cell) in grid.cells().iter().enumerate() {
        let pos = grid.position_of(i);
        let to = Position::new(grid.width() as i32 - 1 - pos.x, pos.y);
        for kind in Pheromone::ALL {
            field.deposit(&mut flipped, to, kind, cell.pheromone(kind));
        }
    }
    flipped
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn evaporation_never_raises_a_level(
        grid in arb_field(1000.0),
        rate in 0.0f32..1.0,
        rounds in 1usize..6,
    ) {
        let field = engine(rate, 0.0);
        let mut grid = grid;
        for _ in 0..rounds {
            let before = grid.clone();
            field.evaporate(&mut grid);
            for (old, new) in before.cells().iter().zip(grid.cells()) {
                for kind in Pheromone::ALL {
                    prop_assert!(new.pheromone(kind) >= 0.0);
                    prop_assert!(new.pheromone(kind) <= old.pheromone(kind));
                    if old.pheromone(kind) == 0.0 {
                        prop_assert_eq!(new.pheromone(kind), 0.0);
                    }
                }
            }
        }
    }

    #[test]
    fn diffusion_conserves_mass(
        grid in arb_field(400.0),
        rate in 0.0f32..0.2,
    ) {
        let field = engine(0.0, rate);
        let mut grid = grid;
        for kind in Pheromone::ALL {
            let before = grid.total_pheromone(kind);
            let mut after_grid = grid.clone();
            field.diffuse(&mut after_grid).unwrap();
            let after = after_grid.total_pheromone(kind);
            prop_assert!((before - after).abs() <= before * 1e-4 + 1e-2,
                "{:?} mass {} -> {}", kind, before, after);
        }
        field.diffuse(&mut grid).unwrap();
        for cell in grid.cells() {
            for kind in Pheromone::ALL {
                prop_assert!((0.0..=field.max).contains(&cell.pheromone(kind)));
            }
        }
    }

    #[test]
    fn diffusion_near_ceiling_ignores_scan_order(
        grid in arb_field(1000.0),
        rate in 0.0f32..1.0,
    ) {
        let field = engine(0.0, rate);

        let mut direct = grid.clone();
        field.diffuse(&mut direct).unwrap();
        let mut flipped = mirrored(&grid);
        field.diffuse(&mut flipped).unwrap();
        let flipped_back = mirrored(&flipped);

        for (a, b) in direct.cells().iter().zip(flipped_back.cells()) {
            for kind in Pheromone::ALL {
                prop_assert!((a.pheromone(kind) - b.pheromone(kind)).abs() < 1e-2,
                    "{:?}: {} vs {}", kind, a.pheromone(kind), b.pheromone(kind));
                prop_assert!((0.0..=field.max).contains(&a.pheromone(kind)));
            }
        }
        for kind in Pheromone::ALL {
            let before = grid.total_pheromone(kind);
            prop_assert!(direct.total_pheromone(kind) <= before * (1.0 + 1e-4) + 1e-2);
        }
    }

    #[test]
    fn deposit_below_ceiling_is_exact(
        prior in 0.0f32..800.0,
        amount in 0.0f32..100.0,
    ) {
        let field = engine(0.0, 0.0);
        let mut grid = Grid::new(2, 2).unwrap();
        let pos = Position::new(1, 0);
        field.deposit(&mut grid, pos, Pheromone::Food, prior);
        field.deposit(&mut grid, pos, Pheromone::Food, amount);
        prop_assert_eq!(field.query(&grid, pos, Pheromone::Food), prior + amount);
    }

    #[test]
    fn deposit_at_ceiling_stays_at_ceiling(amount in 0.0f32..5000.0) {
        let field = engine(0.0, 0.0);
        let mut grid = Grid::new(1, 1).unwrap();
        let pos = Position::new(0, 0);
        field.deposit(&mut grid, pos, Pheromone::Home, field.max);
        field.deposit(&mut grid, pos, Pheromone::Home, amount);
        prop_assert_eq!(field.query(&grid, pos, Pheromone::Home), field.max);
    }

    #[test]
    fn normalize_lifts_peak_to_ceiling(grid in arb_field(1000.0)) {
        let field = engine(0.0, 0.0);
        let mut grid = grid;
        let peaks: Vec<f32> = Pheromone::ALL.iter().map(|&k| grid.max_pheromone(k)).collect();
        field.normalize(&mut grid);
        for (kind, peak) in Pheromone::ALL.into_iter().zip(peaks) {
            if peak > 0.0 {
                prop_assert_eq!(grid.max_pheromone(kind), field.max);
            } else {
                prop_assert_eq!(grid.max_pheromone(kind), 0.0);
            }
        }
    }
}
