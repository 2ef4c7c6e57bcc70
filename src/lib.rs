//! # Ant Colony Sim
//!
//! Several ant colonies foraging on a bounded grid, coordinating only through
//! two chemical trail fields that ants lay down and that evaporate and diffuse
//! every step.
//!
//! This library provides the pheromone field engine, the per-ant foraging state
//! machine, colony bookkeeping and the world step loop, plus save/load support.

pub mod ant;
pub mod cli;
pub mod colony;
pub mod config;
pub mod direction;
pub mod error;
pub mod forage;
pub mod persistence;
pub mod pheromone;
pub mod simulation;
pub mod world;

pub use ant::{Ant, StateFlags};
pub use cli::Args;
pub use colony::{Colony, ColonyStats};
pub use config::SimConfig;
pub use direction::Direction;
pub use error::{Result, SimError};
pub use pheromone::{FieldEngine, Pheromone};
pub use simulation::SimulationEngine;
pub use world::{Grid, Position, RunState, World};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Ant, Args, Colony, ColonyStats, Direction, FieldEngine, Grid, Pheromone, Position, Result, RunState,
        SimConfig, SimError, SimulationEngine, StateFlags, World,
    };
}
