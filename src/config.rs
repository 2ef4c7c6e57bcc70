//! Simulation parameters.
//!
//! A `SimConfig` is handed to the world once at construction. Every field has a
//! default, so a TOML file only needs the values it wants to change:
//!
//! ```toml
//! [world]
//! width = 40
//! height = 20
//!
//! [pheromone]
//! evaporation_rate = 0.05
//! ```

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest supported grid side
pub const MAX_WORLD_SIZE: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub pheromone: PheromoneConfig,
    pub ant: AntConfig,
    pub colony: ColonyConfig,
}

/// Grid layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    /// Food sources placed by the generated layout
    pub food_sources: usize,
    /// Units of food per generated or parsed source
    pub food_per_source: u32,
    /// Fraction of generated cells turned into walls
    pub wall_density: f32,
    /// Stored for the presentation layer; the core never sleeps
    pub render_delay_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 30,
            food_sources: 4,
            food_per_source: 50,
            wall_density: 0.0,
            render_delay_ms: 100,
        }
    }
}

/// Chemical field parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PheromoneConfig {
    /// Ceiling for both trail fields
    pub max: f32,
    pub deposit_amount: f32,
    pub evaporation_rate: f32,
    pub diffusion_rate: f32,
    /// Values below this snap to zero after evaporation
    pub epsilon: f32,
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            max: 1000.0,
            deposit_amount: 100.0,
            evaporation_rate: 0.02,
            diffusion_rate: 0.01,
            epsilon: 0.1,
        }
    }
}

/// Per-ant behaviour parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntConfig {
    pub initial_energy: u32,
    pub energy_per_step: u32,
    pub energy_from_food: u32,
    pub tired_threshold: u32,
    /// Chance a non-scout ant steers by the trail gradient
    pub follow_probability: f32,
    pub scout_fraction: f32,
    pub scout_exploration_rate: f32,
    pub path_history_cap: usize,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            initial_energy: 1000,
            energy_per_step: 1,
            energy_from_food: 500,
            tired_threshold: 100,
            follow_probability: 0.8,
            scout_fraction: 0.1,
            scout_exploration_rate: 0.5,
            path_history_cap: 256,
        }
    }
}

impl AntConfig {
    /// Exploration rate for a freshly spawned ant
    pub fn exploration_rate(&self, scout: bool) -> f32 {
        let base = 1.0 - self.follow_probability;
        if scout {
            base.max(self.scout_exploration_rate)
        } else {
            base
        }
    }
}

/// Colony population parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColonyConfig {
    /// Nests placed by the generated layout
    pub count: usize,
    pub initial_ants: usize,
    pub max_ants: usize,
    /// Delivered food per extra ant; 0 disables growth
    pub food_per_spawn: u32,
    /// Steps between dead-ant cleanups; 0 keeps dead ants until reset
    pub cleanup_interval: u64,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            count: 2,
            initial_ants: 20,
            max_ants: 50,
            food_per_spawn: 5,
            cleanup_interval: 0,
        }
    }
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.width == 0 || w.height == 0 || w.width > MAX_WORLD_SIZE || w.height > MAX_WORLD_SIZE {
            return Err(SimError::invalid_config(format!(
                "world size {}x{} outside 1..={}",
                w.width, w.height, MAX_WORLD_SIZE
            )));
        }

        let unit = |name: &str, v: f32| -> Result<()> {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(SimError::invalid_config(format!("{} = {} outside [0, 1]", name, v)))
            }
        };
        unit("world.wall_density", w.wall_density)?;
        unit("pheromone.evaporation_rate", self.pheromone.evaporation_rate)?;
        unit("pheromone.diffusion_rate", self.pheromone.diffusion_rate)?;
        unit("ant.follow_probability", self.ant.follow_probability)?;
        unit("ant.scout_fraction", self.ant.scout_fraction)?;
        unit("ant.scout_exploration_rate", self.ant.scout_exploration_rate)?;

        let p = &self.pheromone;
        if p.max.is_nan() || p.max <= 0.0 {
            return Err(SimError::invalid_config("pheromone.max must be positive"));
        }
        if p.deposit_amount.is_nan() || p.deposit_amount < 0.0 || p.epsilon.is_nan() || p.epsilon < 0.0 {
            return Err(SimError::invalid_config(
                "pheromone.deposit_amount and pheromone.epsilon must not be negative",
            ));
        }
        if self.colony.count == 0 {
            return Err(SimError::invalid_config("colony.count must be at least 1"));
        }
        if self.colony.initial_ants > self.colony.max_ants {
            return Err(SimError::invalid_config(format!(
                "colony.initial_ants ({}) exceeds colony.max_ants ({})",
                self.colony.initial_ants, self.colony.max_ants
            )));
        }
        Ok(())
    }
}
