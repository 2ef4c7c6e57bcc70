use crate::cli::Args;
use crate::pheromone::Pheromone;
use crate::world::World;
use colored::{Color, Colorize};
use std::time::{Duration, Instant};

const PALETTE: [Color; 8] = [
    Color::BrightRed,
    Color::BrightBlue,
    Color::BrightGreen,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightYellow,
    Color::BrightWhite,
    Color::Red,
];

/// Drives a world for a bounded number of steps and reports on it
pub struct SimulationEngine {
    report_every: u64,
    suppress_events: bool,
}

impl SimulationEngine {
    pub fn new(args: &Args) -> Self {
        Self {
            report_every: args.report_every,
            suppress_events: args.suppress_events,
        }
    }

    /// Step `world` up to `max_steps` more times, stopping early when it
    /// refuses to step or every ant is dead. Returns the wall time spent.
    pub fn run_simulation(&mut self, world: &mut World, max_steps: u64) -> Duration {
        let sim_start = Instant::now();
        let target = world.current_step().saturating_add(max_steps);

        while world.current_step() < target {
            if !world.step() {
                break;
            }
            if self.report_every > 0 && world.current_step() % self.report_every == 0 {
                self.log_progress(world);
            }
            if world.living_ants() == 0 {
                self.log_extinction(world);
                world.stop();
                break;
            }
        }

        sim_start.elapsed()
    }

    fn log_progress(&self, world: &World) {
        if self.suppress_events {
            return;
        }
        let delivered: u64 = world.colonies().iter().map(|c| c.food_collected).sum();
        println!(
            "{} {} {} {}",
            "🐜".green(),
            format!("step {}", world.current_step()).bright_white(),
            format!("ants={}", world.living_ants()).cyan(),
            format!("food={}", delivered).yellow()
        );
    }

    fn log_extinction(&self, world: &World) {
        if self.suppress_events {
            return;
        }
        println!(
            "{} {}",
            "💀".red(),
            format!("every ant has died by step {}", world.current_step()).bright_red()
        );
    }

    /// Print simulation summary
    pub fn print_summary(&self, world: &World, simulation_time: Duration) {
        for stats in world.colony_stats() {
            let color = PALETTE[stats.color as usize % PALETTE.len()];
            println!(
                "{} {} {} {} {} {}",
                format!("Colony {}", stats.id).color(color).bold(),
                format!("food={}", stats.food_collected).yellow(),
                format!("lifetime={}", stats.total_food_collected).dimmed(),
                format!("ants={}/{}", stats.active_ants, stats.total_ants).cyan(),
                format!("efficiency={:.4}", stats.efficiency).green(),
                format!("territory={}", stats.territory_size).magenta(),
            );
        }

        let grid = world.grid();
        println!(
            "\n{}\n{} {:.3} ms {} {} {} {} {} {}",
            "===".bright_blue().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            simulation_time.as_secs_f64() * 1000.0,
            format!("({}x{})", grid.width(), grid.height()).dimmed(),
            "|".dimmed(),
            format!("steps={}", world.current_step()).cyan(),
            format!("survivors={}", world.living_ants()).cyan(),
            format!("food_left={}", grid.food_remaining()).cyan(),
            format!(
                "trail_mass={:.1}",
                grid.total_pheromone(Pheromone::Food) + grid.total_pheromone(Pheromone::Home)
            )
            .cyan(),
        );
    }
}
