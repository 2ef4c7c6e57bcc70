use crate::ant::Ant;
use crate::colony::{Colony, ColonyStats};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::forage::{self, Outcome};
use crate::pheromone::FieldEngine;
use crate::world::grid::Grid;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Control state: `NotStarted -> Running <-> Paused`, any state `-> Stopped`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    NotStarted,
    Running,
    Paused,
    Stopped,
}

/// Grid, colonies and step counter for one simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    config: SimConfig,
    grid: Grid,
    /// Terrain and food as built, restored by `reset`
    layout: Grid,
    colonies: Vec<Colony>,
    current_step: u64,
    state: RunState,
    render_delay_ms: u64,
    #[serde(with = "rng_seed")]
    rng: fastrand::Rng,
}

/// Serialise the RNG as its current seed so a loaded world replays the same draws
mod rng_seed {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(rng: &fastrand::Rng, s: S) -> Result<S::Ok, S::Error> {
        rng.get_seed().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<fastrand::Rng, D::Error> {
        u64::deserialize(d).map(fastrand::Rng::with_seed)
    }
}

impl World {
    /// Build a world over `grid`, one colony per nest cell
    pub fn new(mut config: SimConfig, grid: Grid, seed: u64) -> Result<Self> {
        let nests = grid.nests();
        if nests.is_empty() {
            return Err(SimError::invalid_map("grid has no nest"));
        }
        config.world.width = grid.width();
        config.world.height = grid.height();
        config.colony.count = nests.len();
        config.validate()?;

        let mut rng = fastrand::Rng::with_seed(seed);
        let colonies = nests
            .iter()
            .map(|&(id, nest)| {
                let mut colony = Colony::new(id, nest);
                colony.populate(&config, &mut rng);
                colony
            })
            .collect();

        let world = Self {
            render_delay_ms: config.world.render_delay_ms,
            layout: grid.clone(),
            grid,
            colonies,
            current_step: 0,
            state: RunState::NotStarted,
            config,
            rng,
        };
        info!(
            width = world.grid.width(),
            height = world.grid.height(),
            colonies = world.colonies.len(),
            seed,
            "world built"
        );
        Ok(world)
    }

    /// Build a world on a generated layout
    pub fn generate(config: SimConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = fastrand::Rng::with_seed(seed);
        let grid = Grid::generate(&config, &mut rng)?;
        Self::new(config, grid, rng.u64(..))
    }

    /// Advance one step: every living ant acts, then the field evaporates,
    /// then it diffuses. Does nothing while paused or stopped; the first call
    /// on a fresh world starts it. Returns whether a step ran.
    pub fn step(&mut self) -> bool {
        match self.state {
            RunState::Paused | RunState::Stopped => return false,
            RunState::NotStarted => {
                self.state = RunState::Running;
                info!("simulation started");
            }
            RunState::Running => {}
        }

        let field = self.field();
        for colony in self.colonies.iter_mut() {
            let mut delivered = 0u64;
            let mut acted = 0u64;
            for ant in colony.ants.iter_mut() {
                match forage::advance(ant, &mut self.grid, &field, &self.config.ant, &mut self.rng) {
                    Outcome::Inert | Outcome::Died => {}
                    Outcome::Delivered => {
                        delivered += 1;
                        acted += 1;
                    }
                    Outcome::Foraged | Outcome::PickedUp => acted += 1,
                }
            }

            colony.record_steps(acted);
            let per_spawn = self.config.colony.food_per_spawn as u64;
            for _ in 0..delivered {
                colony.record_food_delivered(1);
                if per_spawn > 0 && colony.food_collected % per_spawn == 0 {
                    colony.spawn_ant(&self.config, &mut self.rng);
                }
            }
            colony.refresh_stats();
        }

        field.evaporate(&mut self.grid);
        if let Err(err) = field.diffuse(&mut self.grid) {
            warn!(step = self.current_step, %err, "diffusion pass abandoned");
        }

        self.current_step += 1;
        let interval = self.config.colony.cleanup_interval;
        if interval > 0 && self.current_step % interval == 0 {
            let removed: usize = self.colonies.iter_mut().map(Colony::cleanup_dead).sum();
            if removed > 0 {
                debug!(step = self.current_step, removed, "dead ants cleaned up");
            }
        }
        true
    }

    /// Check a deserialised world for internal consistency: valid config,
    /// grids whose buffers match their dimensions, and everything on the grid
    pub fn check_integrity(&self) -> Result<()> {
        self.config.validate()?;
        self.grid.check_shape()?;
        self.layout.check_shape()?;

        let dims = (self.grid.width(), self.grid.height());
        if (self.layout.width(), self.layout.height()) != dims {
            return Err(SimError::invalid_map(format!(
                "layout is {}x{} but grid is {}x{}",
                self.layout.width(),
                self.layout.height(),
                dims.0,
                dims.1
            )));
        }
        if (self.config.world.width, self.config.world.height) != dims {
            return Err(SimError::invalid_config(format!(
                "world.width/height {}x{} disagree with the {}x{} grid",
                self.config.world.width, self.config.world.height, dims.0, dims.1
            )));
        }

        for colony in &self.colonies {
            if !self.grid.in_bounds(colony.nest) {
                return Err(SimError::invalid_map(format!(
                    "colony {} nest {} is off the grid",
                    colony.id, colony.nest
                )));
            }
            if let Some(ant) = colony.ants.iter().find(|a| !self.grid.in_bounds(a.pos)) {
                return Err(SimError::invalid_map(format!(
                    "ant {} of colony {} stands off the grid at {}",
                    ant.id, colony.id, ant.pos
                )));
            }
        }
        Ok(())
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Paused;
            info!(step = self.current_step, "simulation paused");
        }
    }

    /// Continue a paused world, or start a fresh one
    pub fn resume(&mut self) {
        if matches!(self.state, RunState::Paused | RunState::NotStarted) {
            self.state = RunState::Running;
            info!(step = self.current_step, "simulation resumed");
        }
    }

    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            self.state = RunState::Stopped;
            info!(step = self.current_step, "simulation stopped");
        }
    }

    /// Back to the built layout: trails cleared, food restored, colonies
    /// repopulated, step counter and session food zeroed. Lifetime food is kept.
    pub fn reset(&mut self) {
        self.grid = self.layout.clone();
        self.field().reset(&mut self.grid);
        for colony in self.colonies.iter_mut() {
            colony.reset_session();
            colony.populate(&self.config, &mut self.rng);
        }
        self.current_step = 0;
        self.state = RunState::NotStarted;
        info!("world reset");
    }

    /// Field engine configured from this world's pheromone parameters
    #[inline]
    pub fn field(&self) -> FieldEngine {
        FieldEngine::from(&self.config.pheromone)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn colonies(&self) -> &[Colony] {
        &self.colonies
    }

    pub fn colony(&self, id: u32) -> Option<&Colony> {
        self.colonies.iter().find(|c| c.id == id)
    }

    /// Every stored ant, dead ones included
    pub fn ants(&self) -> impl Iterator<Item = &Ant> {
        self.colonies.iter().flat_map(|c| c.ants.iter())
    }

    pub fn living_ants(&self) -> usize {
        self.ants().filter(|a| a.is_alive()).count()
    }

    pub fn colony_stats(&self) -> Vec<ColonyStats> {
        self.colonies.iter().map(Colony::stats).collect()
    }

    #[inline]
    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    /// Delay between rendered frames; the core never waits on it
    pub fn render_delay_ms(&self) -> u64 {
        self.render_delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ant::StateFlags;
    use crate::pheromone::Pheromone;
    use crate::world::parser::parse_map_from_str;
    use crate::world::Position;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.colony.initial_ants = 3;
        config.colony.max_ants = 5;
        config
    }

    fn world(map: &str) -> World {
        let config = small_config();
        let grid = parse_map_from_str(map, config.world.food_per_source).unwrap();
        World::new(config, grid, 42).unwrap()
    }

    #[test]
    fn test_world_creation() {
        let world = world("0....\n.....\n....1\n");

        assert_eq!(world.colonies().len(), 2);
        assert_eq!(world.colony(1).unwrap().nest, Position::new(4, 2));
        assert_eq!(world.living_ants(), 6);
        assert_eq!(world.state(), RunState::NotStarted);
        assert_eq!(world.current_step(), 0);
        assert_eq!(world.config().world.width, 5);
    }

    #[test]
    fn test_world_without_nest_rejected() {
        let grid = parse_map_from_str("...\n", 5).unwrap();
        assert!(World::new(SimConfig::default(), grid, 1).is_err());
    }

    #[test]
    fn test_generate() {
        let world = World::generate(small_config(), 7).unwrap();
        assert_eq!(world.grid().width(), 60);
        assert_eq!(world.colonies().len(), 2);
        assert_eq!(world.render_delay_ms(), 100);
    }

    #[test]
    fn test_first_step_starts_world() {
        let mut world = world("0...\n....\n");

        assert!(world.step());
        assert!(world.is_running());
        assert_eq!(world.current_step(), 1);
        assert!(world.grid().total_pheromone(Pheromone::Home) > 0.0);
    }

    #[test]
    fn test_pause_and_stop_block_steps() {
        let mut world = world("0...\n....\n");
        world.step();

        world.pause();
        assert!(world.is_paused());
        let frozen = world.grid().clone();
        assert!(!world.step());
        assert_eq!(world.current_step(), 1);
        assert_eq!(world.grid(), &frozen);

        world.resume();
        assert!(world.step());
        assert_eq!(world.current_step(), 2);

        world.stop();
        assert!(!world.step());
        world.resume();
        assert_eq!(world.state(), RunState::Stopped);
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut world = world("0..F\n....\n");
        let layout = world.grid().clone();
        for _ in 0..20 {
            world.step();
        }

        world.reset();

        assert_eq!(world.grid(), &layout);
        assert_eq!(world.current_step(), 0);
        assert_eq!(world.state(), RunState::NotStarted);
        let colony = world.colony(0).unwrap();
        assert_eq!(colony.ants.len(), 3);
        assert_eq!(colony.food_collected, 0);
        assert!(colony
            .ants
            .iter()
            .all(|a| a.pos == colony.nest && a.state.contains(StateFlags::SEARCHING)));
    }

    #[test]
    fn test_starved_ants_stay_stored() {
        let mut config = small_config();
        config.ant.initial_energy = 2;
        let grid = parse_map_from_str("0..\n...\n", 5).unwrap();
        let mut world = World::new(config, grid, 3).unwrap();

        world.step();
        world.step();

        assert_eq!(world.living_ants(), 0);
        assert_eq!(world.ants().count(), 3);
        assert_eq!(world.colony(0).unwrap().active_ants, 0);
        assert_eq!(world.colony(0).unwrap().agent_steps, 3);
    }

    #[test]
    fn test_cleanup_interval_drops_dead() {
        let mut config = small_config();
        config.ant.initial_energy = 1;
        config.colony.cleanup_interval = 2;
        let grid = parse_map_from_str("0..\n", 5).unwrap();
        let mut world = World::new(config, grid, 3).unwrap();

        world.step();
        assert_eq!(world.ants().count(), 3);
        world.step();
        assert_eq!(world.ants().count(), 0);
    }

    #[test]
    fn test_delivery_spawns_ant() {
        let mut config = small_config();
        config.colony.initial_ants = 1;
        config.colony.food_per_spawn = 1;
        config.ant.follow_probability = 0.0;
        let grid = parse_map_from_str("0*\n", 5).unwrap();
        let mut world = World::new(config, grid, 5).unwrap();

        // Two cells: out to the food, back to the nest
        world.step();
        world.step();

        let colony = world.colony(0).unwrap();
        assert_eq!(colony.food_collected, 1);
        assert_eq!(colony.total_food_collected, 1);
        assert_eq!(colony.ants.len(), 2);
        assert!((colony.efficiency_score - 0.5).abs() < 1e-6);
    }
}
