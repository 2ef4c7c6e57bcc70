use serde::{Deserialize, Serialize};
use std::fmt;

/// Food amount marking a source that never runs out
pub const UNLIMITED_FOOD: u32 = u32::MAX;

/// Integer grid coordinate; may lie outside the grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Empty,
    Wall,
    Food,
    Nest,
    Water,
}

impl Terrain {
    /// Walls and water block ant movement
    #[inline]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Terrain::Wall | Terrain::Water)
    }
}

/// Grid cell: terrain, both trail concentrations and food stock
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub terrain: Terrain,
    pub pheromone_food: f32,
    pub pheromone_home: f32,
    pub food_amount: u32,
    /// Owning colony, set for nest cells only
    pub colony_id: Option<u32>,
}

impl Cell {
    #[inline]
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            ..Self::default()
        }
    }

    /// Food source holding `amount` units
    pub fn food(amount: u32) -> Self {
        Self {
            terrain: Terrain::Food,
            food_amount: amount,
            ..Self::default()
        }
    }

    /// Nest belonging to `colony_id`
    pub fn nest(colony_id: u32) -> Self {
        Self {
            terrain: Terrain::Nest,
            colony_id: Some(colony_id),
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_passable(&self) -> bool {
        self.terrain.is_passable()
    }

    #[inline]
    pub fn is_nest_of(&self, colony_id: u32) -> bool {
        self.terrain == Terrain::Nest && self.colony_id == Some(colony_id)
    }

    #[inline]
    pub fn has_food(&self) -> bool {
        self.terrain == Terrain::Food && self.food_amount > 0
    }

    /// Take one unit of food; returns false at depleted or non-food cells
    pub fn take_food(&mut self) -> bool {
        if !self.has_food() {
            return false;
        }
        if self.food_amount != UNLIMITED_FOOD {
            self.food_amount -= 1;
        }
        true
    }
}
