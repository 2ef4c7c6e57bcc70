use ant_colony_sim::persistence::{load_world, save_world};
use ant_colony_sim::prelude::*;
use ant_colony_sim::world::parse_map;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ant_colony_sim=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));

    let mut world = match &args.load {
        Some(path) => load_world(path)?,
        None => {
            let mut config = match &args.config {
                Some(path) => SimConfig::load(path)?,
                None => SimConfig::default(),
            };
            args.apply_overrides(&mut config);
            config.validate()?;

            match &args.map {
                Some(path) => {
                    let grid = parse_map(path, config.world.food_per_source)?;
                    World::new(config, grid, seed)?
                }
                None => World::generate(config, seed)?,
            }
        }
    };
    if world.is_paused() {
        world.resume();
    }

    // Run simulation
    let mut engine = SimulationEngine::new(&args);
    let simulation_time = engine.run_simulation(&mut world, args.steps);

    // Print results
    engine.print_summary(&world, simulation_time);

    if let Some(path) = &args.save {
        save_world(&world, path)?;
    }

    Ok(())
}
