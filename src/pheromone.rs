//! Pheromone field engine.
//!
//! Every operation works on a [`Grid`] in place and knows nothing about ants.
//! The world runs them in a fixed order each step: agents deposit, then the
//! whole field evaporates, then it diffuses once from a frozen snapshot.

use crate::config::PheromoneConfig;
use crate::error::{Result, SimError};
use crate::world::{Cell, Grid, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Level every field starts from and returns to on reset
pub const INITIAL_LEVEL: f32 = 0.0;

/// The two independent trail fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pheromone {
    /// Laid by returning ants, leads to food
    Food,
    /// Laid by searching ants, leads back to the nest
    Home,
}

impl Pheromone {
    pub const ALL: [Pheromone; 2] = [Pheromone::Food, Pheromone::Home];

    pub const fn as_str(self) -> &'static str {
        match self {
            Pheromone::Food => "food",
            Pheromone::Home => "home",
        }
    }
}

impl Cell {
    #[inline]
    pub fn pheromone(&self, kind: Pheromone) -> f32 {
        match kind {
            Pheromone::Food => self.pheromone_food,
            Pheromone::Home => self.pheromone_home,
        }
    }

    #[inline]
    pub fn pheromone_mut(&mut self, kind: Pheromone) -> &mut f32 {
        match kind {
            Pheromone::Food => &mut self.pheromone_food,
            Pheromone::Home => &mut self.pheromone_home,
        }
    }
}

impl Grid {
    /// Total mass of one field
    pub fn total_pheromone(&self, kind: Pheromone) -> f64 {
        self.cells().iter().map(|c| c.pheromone(kind) as f64).sum()
    }

    /// Largest value of one field anywhere on the grid
    pub fn max_pheromone(&self, kind: Pheromone) -> f32 {
        self.cells()
            .iter()
            .map(|c| c.pheromone(kind))
            .fold(0.0, f32::max)
    }
}

/// Deposit, decay and spread rules for the trail fields
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldEngine {
    pub max: f32,
    pub evaporation_rate: f32,
    pub diffusion_rate: f32,
    pub epsilon: f32,
}

impl From<&PheromoneConfig> for FieldEngine {
    fn from(config: &PheromoneConfig) -> Self {
        Self {
            max: config.max,
            evaporation_rate: config.evaporation_rate,
            diffusion_rate: config.diffusion_rate,
            epsilon: config.epsilon,
        }
    }
}

impl FieldEngine {
    /// Add `amount` to one field at `pos`, clamped to `[0, max]`.
    /// Out-of-bounds positions are ignored.
    pub fn deposit(&self, grid: &mut Grid, pos: Position, kind: Pheromone, amount: f32) {
        if let Some(cell) = grid.cell_mut(pos) {
            let level = cell.pheromone_mut(kind);
            *level = (*level + amount).clamp(0.0, self.max);
        }
    }

    /// Concentration at `pos`; 0 outside the grid
    #[inline]
    pub fn query(&self, grid: &Grid, pos: Position, kind: Pheromone) -> f32 {
        grid.cell(pos).map_or(0.0, |c| c.pheromone(kind))
    }

    /// Highest concentration among the in-bounds Moore neighbours of `pos`
    pub fn query_max_neighbor(&self, grid: &Grid, pos: Position, kind: Pheromone) -> f32 {
        if !grid.in_bounds(pos) {
            return 0.0;
        }
        grid.neighbors(pos)
            .map(|(_, p)| self.query(grid, p, kind))
            .fold(0.0, f32::max)
    }

    /// Decay every value by the evaporation rate, snapping tiny values to 0
    pub fn evaporate(&self, grid: &mut Grid) {
        let keep = 1.0 - self.evaporation_rate;
        for cell in grid.cells_mut() {
            for kind in Pheromone::ALL {
                let level = cell.pheromone_mut(kind);
                *level *= keep;
                if *level < self.epsilon {
                    *level = 0.0;
                }
            }
        }
    }

    /// Spread `diffusion_rate` of every cell evenly over its in-bounds neighbours.
    ///
    /// Transfers read the field as it stood before the pass and accumulate in a
    /// separate buffer. Levels are clamped to `[0, max]` only once every transfer
    /// has landed, so the result does not depend on scan order. If the buffer
    /// cannot be allocated the grid is left untouched and `SimError::Allocation`
    /// returned.
    pub fn diffuse(&self, grid: &mut Grid) -> Result<()> {
        if self.diffusion_rate <= 0.0 {
            return Ok(());
        }

        let n = grid.len();
        let mut next: Vec<f32> = Vec::new();
        next
            .try_reserve_exact(n * 2)
            .map_err(|e| SimError::Allocation(format!("diffusion buffer: {}", e)))?;
        next.extend(grid.cells().iter().map(|c| c.pheromone_food));
        next.extend(grid.cells().iter().map(|c| c.pheromone_home));

        let mut targets = [0usize; 8];
        for (idx, cell) in grid.cells().iter().enumerate() {
            let mut count = 0;
            for (_, p) in grid.neighbors(grid.position_of(idx)) {
                if let Some(i) = grid.index(p) {
                    targets[count] = i;
                    count += 1;
                }
            }
            if count == 0 {
                continue;
            }

            for (k, kind) in Pheromone::ALL.into_iter().enumerate() {
                let source = cell.pheromone(kind);
                if source <= 0.0 {
                    continue;
                }
                let share = source * self.diffusion_rate / count as f32;
                for &t in &targets[..count] {
                    next[k * n + t] += share;
                }
                next[k * n + idx] -= share * count as f32;
            }
        }

        for (idx, cell) in grid.cells_mut().iter_mut().enumerate() {
            for (k, kind) in Pheromone::ALL.into_iter().enumerate() {
                *cell.pheromone_mut(kind) = next[k * n + idx].clamp(0.0, self.max);
            }
        }
        Ok(())
    }

    /// Set both fields back to the initial level everywhere
    pub fn reset(&self, grid: &mut Grid) {
        for cell in grid.cells_mut() {
            cell.pheromone_food = INITIAL_LEVEL;
            cell.pheromone_home = INITIAL_LEVEL;
        }
        debug!("all pheromones reset");
    }

    /// Rescale each field so its global maximum equals the ceiling.
    /// A field whose maximum is 0 is left alone.
    pub fn normalize(&self, grid: &mut Grid) {
        for kind in Pheromone::ALL {
            let peak = grid.max_pheromone(kind);
            if peak <= 0.0 {
                continue;
            }
            for cell in grid.cells_mut() {
                let level = cell.pheromone_mut(kind);
                *level = *level / peak * self.max;
            }
            debug!(trail = kind.as_str(), peak, "field normalized");
        }
    }
}
