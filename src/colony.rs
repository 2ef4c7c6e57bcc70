use crate::ant::Ant;
use crate::config::SimConfig;
use crate::world::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Number of distinct colony palette slots
pub const PALETTE_SIZE: u32 = 8;

/// A nest and the ants it owns
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub id: u32,
    pub nest: Position,
    /// Food delivered since the last world reset
    pub food_collected: u64,
    /// Food delivered over the colony's whole life
    pub total_food_collected: u64,
    /// Ants ever spawned
    pub total_ants: u32,
    pub active_ants: u32,
    /// Step-by-step ant storage; dead ants stay until cleanup
    pub ants: Vec<Ant>,
    /// Palette slot for the presentation layer
    pub color: u8,
    pub efficiency_score: f32,
    /// Living-ant steps taken since the last reset
    pub agent_steps: u64,
    next_ant_id: u32,
}

/// Aggregate numbers for one colony
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColonyStats {
    pub id: u32,
    pub nest: Position,
    pub color: u8,
    pub food_collected: u64,
    pub total_food_collected: u64,
    pub total_ants: u32,
    pub active_ants: u32,
    pub stored_ants: usize,
    pub efficiency: f32,
    pub territory_size: usize,
}

impl Colony {
    pub fn new(id: u32, nest: Position) -> Self {
        Self {
            id,
            nest,
            food_collected: 0,
            total_food_collected: 0,
            total_ants: 0,
            active_ants: 0,
            ants: Vec::new(),
            color: (id % PALETTE_SIZE) as u8,
            efficiency_score: 0.0,
            agent_steps: 0,
            next_ant_id: 0,
        }
    }

    /// Spawn the configured starting population
    pub fn populate(&mut self, config: &SimConfig, rng: &mut fastrand::Rng) {
        for _ in 0..config.colony.initial_ants {
            if self.spawn_ant(config, rng).is_none() {
                break;
            }
        }
    }

    /// Add one ant at the nest; `None` once the colony holds `max_ants`
    pub fn spawn_ant(&mut self, config: &SimConfig, rng: &mut fastrand::Rng) -> Option<u32> {
        if self.ants.len() >= config.colony.max_ants {
            return None;
        }
        let id = self.next_ant_id;
        let scout = rng.f32() < config.ant.scout_fraction;
        self.ants.push(Ant::new(
            id,
            self.id,
            self.nest,
            &config.ant,
            config.pheromone.deposit_amount,
            scout,
        ));
        self.next_ant_id += 1;
        self.total_ants += 1;
        self.active_ants += 1;
        debug!(colony = self.id, ant = id, scout, "ant spawned");
        Some(id)
    }

    /// Count `amount` delivered units in both session and lifetime totals
    pub fn record_food_delivered(&mut self, amount: u64) {
        self.food_collected += amount;
        self.total_food_collected += amount;
    }

    pub fn record_steps(&mut self, steps: u64) {
        self.agent_steps += steps;
    }

    /// Food delivered per agent-step; 0 before any step
    pub fn compute_efficiency(&self) -> f32 {
        if self.agent_steps == 0 {
            0.0
        } else {
            self.food_collected as f32 / self.agent_steps as f32
        }
    }

    pub fn count_active(&self) -> usize {
        self.ants.iter().filter(|a| a.is_alive()).count()
    }

    /// Distinct cells in the path logs of living ants
    pub fn compute_territory(&self) -> usize {
        self.ants
            .iter()
            .filter(|a| a.is_alive())
            .flat_map(|a| a.path.iter().map(|e| e.pos))
            .collect::<HashSet<Position>>()
            .len()
    }

    /// Recompute the cached derived numbers
    pub fn refresh_stats(&mut self) {
        self.active_ants = self.count_active() as u32;
        self.efficiency_score = self.compute_efficiency();
    }

    /// Drop dead ants from storage; returns how many were removed
    pub fn cleanup_dead(&mut self) -> usize {
        let before = self.ants.len();
        self.ants.retain(|a| a.is_alive());
        before - self.ants.len()
    }

    /// Start a fresh session: no ants, no session food, no steps.
    /// Lifetime food survives.
    pub fn reset_session(&mut self) {
        self.ants.clear();
        self.food_collected = 0;
        self.agent_steps = 0;
        self.active_ants = 0;
        self.efficiency_score = 0.0;
    }

    pub fn stats(&self) -> ColonyStats {
        ColonyStats {
            id: self.id,
            nest: self.nest,
            color: self.color,
            food_collected: self.food_collected,
            total_food_collected: self.total_food_collected,
            total_ants: self.total_ants,
            active_ants: self.count_active() as u32,
            stored_ants: self.ants.len(),
            efficiency: self.compute_efficiency(),
            territory_size: self.compute_territory(),
        }
    }
}
