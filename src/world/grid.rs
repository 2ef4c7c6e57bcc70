use crate::config::{SimConfig, MAX_WORLD_SIZE};
use crate::direction::Direction;
use crate::error::{Result, SimError};
use crate::world::cell::{Cell, Position, Terrain, UNLIMITED_FOOD};
use serde::{Deserialize, Serialize};

/// Fixed-size cell store, one contiguous buffer addressed by `y * width + x`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Allocate an all-empty grid
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .filter(|&n| n > 0)
            .ok_or_else(|| SimError::invalid_config(format!("grid size {}x{}", width, height)))?;

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|e| SimError::Allocation(format!("{} cells: {}", len, e)))?;
        cells.resize(len, Cell::default());

        Ok(Self { width, height, cells })
    }

    /// Check that the buffer holds exactly `width * height` cells within the size limit
    pub fn check_shape(&self) -> Result<()> {
        let limit = 1..=MAX_WORLD_SIZE;
        let fits = limit.contains(&self.width) && limit.contains(&self.height);
        if !fits || self.width * self.height != self.cells.len() {
            return Err(SimError::invalid_map(format!(
                "grid claims {}x{} but holds {} cells",
                self.width,
                self.height,
                self.cells.len()
            )));
        }
        Ok(())
    }

    /// Build the default layout: nests on the centre line, random food and walls
    pub fn generate(config: &SimConfig, rng: &mut fastrand::Rng) -> Result<Self> {
        let mut grid = Self::new(config.world.width, config.world.height)?;
        let count = config.colony.count;
        if count > grid.width {
            return Err(SimError::invalid_config(format!(
                "{} colonies do not fit on a grid {} cells wide",
                count, grid.width
            )));
        }

        let y = (grid.height / 2) as i32;
        for id in 0..count {
            let x = ((id + 1) * grid.width / (count + 1)).min(grid.width - 1) as i32;
            grid.set(Position::new(x, y), Cell::nest(id as u32));
        }

        if config.world.wall_density > 0.0 {
            for cell in grid.cells.iter_mut() {
                if cell.terrain == Terrain::Empty && rng.f32() < config.world.wall_density {
                    *cell = Cell::new(Terrain::Wall);
                }
            }
        }

        let mut empty: Vec<usize> = grid
            .cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| (c.terrain == Terrain::Empty).then_some(i))
            .collect();
        for _ in 0..config.world.food_sources {
            if empty.is_empty() {
                break;
            }
            let idx = empty.swap_remove(rng.usize(..empty.len()));
            grid.cells[idx] = Cell::food(config.world.food_per_source);
        }

        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Buffer index for `pos`, `None` when out of bounds
    #[inline]
    pub fn index(&self, pos: Position) -> Option<usize> {
        self.in_bounds(pos)
            .then(|| pos.y as usize * self.width + pos.x as usize)
    }

    #[inline]
    pub fn position_of(&self, idx: usize) -> Position {
        Position::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    #[inline]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let idx = self.index(pos)?;
        Some(&mut self.cells[idx])
    }

    /// Replace the cell at `pos`; out-of-bounds writes are ignored
    pub fn set(&mut self, pos: Position, cell: Cell) {
        if let Some(slot) = self.cell_mut(pos) {
            *slot = cell;
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// In-bounds Moore neighbours of `pos`
    pub fn neighbors(&self, pos: Position) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |d| (d, d.step_from(pos)))
            .filter(move |&(_, p)| self.in_bounds(p))
    }

    /// Nest cells as `(colony_id, position)`, ordered by colony id
    pub fn nests(&self) -> Vec<(u32, Position)> {
        let mut nests: Vec<(u32, Position)> = self
            .cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| match (c.terrain, c.colony_id) {
                (Terrain::Nest, Some(id)) => Some((id, self.position_of(i))),
                _ => None,
            })
            .collect();
        nests.sort_by_key(|&(id, _)| id);
        nests
    }

    /// Food units left in finite sources
    pub fn food_remaining(&self) -> u64 {
        self.cells
            .iter()
            .filter(|c| c.terrain == Terrain::Food && c.food_amount != UNLIMITED_FOOD)
            .map(|c| c.food_amount as u64)
            .sum()
    }
}
