use crate::config::SimConfig;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the colony simulation
#[derive(Parser, Debug)]
#[command(name = "ant_colony_sim", about = "🐜 Pheromone-trail ant colony simulator")]
pub struct Args {
    /// TOML config file
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Text map file (overrides the generated layout)
    #[arg(short = 'm', long)]
    pub map: Option<PathBuf>,

    /// Grid width for the generated layout
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height for the generated layout
    #[arg(long)]
    pub height: Option<usize>,

    /// Colonies in the generated layout
    #[arg(long)]
    pub colonies: Option<usize>,

    /// Starting ants per colony
    #[arg(short = 'n', long = "ants")]
    pub ants: Option<usize>,

    /// Steps to run
    #[arg(short = 's', long, default_value_t = 10_000)]
    pub steps: u64,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Resume from a saved world instead of building one
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Save the world here after the run
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Print a progress line every N steps (0 disables)
    #[arg(long, default_value_t = 1_000)]
    pub report_every: u64,

    /// Suppress progress and event lines (for benchmarks)
    #[arg(long, default_value_t = false)]
    pub suppress_events: bool,
}

impl Args {
    /// Fold command-line overrides into `config`
    pub fn apply_overrides(&self, config: &mut SimConfig) {
        if let Some(width) = self.width {
            config.world.width = width;
        }
        if let Some(height) = self.height {
            config.world.height = height;
        }
        if let Some(colonies) = self.colonies {
            config.colony.count = colonies;
        }
        if let Some(ants) = self.ants {
            config.colony.initial_ants = ants;
            config.colony.max_ants = config.colony.max_ants.max(ants);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let args = Args::parse_from(["ant_colony_sim", "--width", "20", "-n", "80", "--colonies", "3"]);
        let mut config = SimConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.world.width, 20);
        assert_eq!(config.world.height, 30);
        assert_eq!(config.colony.count, 3);
        assert_eq!(config.colony.initial_ants, 80);
        assert_eq!(config.colony.max_ants, 80);
        assert_eq!(args.steps, 10_000);
    }
}
