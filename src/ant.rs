use crate::config::AntConfig;
use crate::world::Position;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Behaviour flags packed into a byte; flags combine freely
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateFlags(u8);

impl StateFlags {
    pub const IDLE: StateFlags = StateFlags(0x00);
    pub const SEARCHING: StateFlags = StateFlags(0x01);
    pub const RETURNING: StateFlags = StateFlags(0x02);
    pub const FOLLOWING: StateFlags = StateFlags(0x04);
    pub const CARRYING: StateFlags = StateFlags(0x08);
    pub const SCOUT: StateFlags = StateFlags(0x10);
    pub const TIRED: StateFlags = StateFlags(0x20);
    pub const DEAD: StateFlags = StateFlags(0x40);

    const NAMES: [(StateFlags, &'static str); 7] = [
        (Self::SEARCHING, "SEARCHING"),
        (Self::RETURNING, "RETURNING"),
        (Self::FOLLOWING, "FOLLOWING"),
        (Self::CARRYING, "CARRYING"),
        (Self::SCOUT, "SCOUT"),
        (Self::TIRED, "TIRED"),
        (Self::DEAD, "DEAD"),
    ];

    #[inline]
    pub const fn is_idle(self) -> bool {
        self.0 == 0
    }

    /// True when every bit of `other` is set
    #[inline]
    pub const fn contains(self, other: StateFlags) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: StateFlags) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: StateFlags) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn set(&mut self, other: StateFlags, on: bool) {
        if on {
            self.insert(other);
        } else {
            self.remove(other);
        }
    }
}

impl std::ops::BitOr for StateFlags {
    type Output = StateFlags;

    fn bitor(self, rhs: StateFlags) -> StateFlags {
        StateFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for StateFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_idle() {
            return f.write_str("IDLE");
        }
        let mut first = true;
        for (flag, name) in Self::NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// One visited cell and the trail strength found there
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub pos: Position,
    pub strength: f32,
}

/// Visit log that drops its oldest entry once full
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PathHistory {
    cap: usize,
    entries: VecDeque<PathEntry>,
}

impl PathHistory {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            entries: VecDeque::with_capacity(cap.min(64)),
        }
    }

    pub fn push(&mut self, pos: Position, strength: f32) {
        if self.cap == 0 {
            return;
        }
        if self.entries.len() == self.cap {
            self.entries.pop_front();
        }
        self.entries.push_back(PathEntry { pos, strength });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &PathEntry> {
        self.entries.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub id: u32,
    pub colony_id: u32,
    pub pos: Position,
    pub last_pos: Position,
    pub state: StateFlags,
    pub energy: u32,
    pub food_carrying: u8,
    pub steps_taken: u32,
    pub food_delivered: u32,
    /// Trail laid per step
    pub pheromone_strength: f32,
    /// Chance of ignoring the gradient for a random move
    pub exploration_rate: f32,
    pub path: PathHistory,
}

impl Ant {
    /// Fresh ant at its nest, searching for food
    pub fn new(id: u32, colony_id: u32, pos: Position, config: &AntConfig, deposit: f32, scout: bool) -> Self {
        let mut state = StateFlags::SEARCHING;
        state.set(StateFlags::SCOUT, scout);
        Self {
            id,
            colony_id,
            pos,
            last_pos: pos,
            state,
            energy: config.initial_energy,
            food_carrying: 0,
            steps_taken: 0,
            food_delivered: 0,
            pheromone_strength: deposit,
            exploration_rate: config.exploration_rate(scout),
            path: PathHistory::new(config.path_history_cap),
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.state.contains(StateFlags::DEAD)
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead()
    }

    #[inline]
    pub fn is_carrying(&self) -> bool {
        self.state.contains(StateFlags::CARRYING)
    }

    #[inline]
    pub fn is_scout(&self) -> bool {
        self.state.contains(StateFlags::SCOUT)
    }

    /// Spend one step of energy; returns false once the ant has died
    pub fn burn_energy(&mut self, cost: u32) -> bool {
        self.energy = self.energy.saturating_sub(cost);
        if self.energy == 0 {
            self.state.insert(StateFlags::DEAD);
            return false;
        }
        true
    }

    /// Move ant to new position, remembering where it came from
    pub fn move_to(&mut self, new_pos: Position) {
        self.last_pos = self.pos;
        self.pos = new_pos;
    }

    /// Take one unit of food and head home
    pub fn pick_up(&mut self) {
        self.food_carrying = 1;
        self.state.insert(StateFlags::CARRYING | StateFlags::RETURNING);
        self.state.remove(StateFlags::SEARCHING);
    }

    /// Drop food at the nest, refuel and restart the search
    pub fn deliver(&mut self, config: &AntConfig) {
        self.food_carrying = 0;
        self.food_delivered += 1;
        self.state.remove(StateFlags::CARRYING | StateFlags::RETURNING);
        self.state.insert(StateFlags::SEARCHING);
        self.energy = self
            .energy
            .saturating_add(config.energy_from_food)
            .min(config.initial_energy);
        if self.energy > config.tired_threshold {
            self.state.remove(StateFlags::TIRED);
        }
    }
}
