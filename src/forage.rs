//! Per-step foraging policy for a single ant.
//!
//! Order within one step: skip if dead, burn energy (die at zero), move,
//! pick up or deliver food, deposit trail, log the visit. The ant always
//! deposits at the cell it ends on, even when it could not move.

use crate::ant::{Ant, StateFlags};
use crate::config::AntConfig;
use crate::pheromone::{FieldEngine, Pheromone};
use crate::world::{Grid, Position};
use tracing::{debug, trace};

/// What happened to an ant during one step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Already dead, nothing done
    Inert,
    /// Ran out of energy this step
    Died,
    /// Moved or stayed without touching food
    Foraged,
    PickedUp,
    Delivered,
}

/// Trail an ant steers by: home when heading back or tired, food otherwise
#[inline]
pub fn steering_trail(state: StateFlags) -> Pheromone {
    if state.contains(StateFlags::RETURNING) || state.contains(StateFlags::TIRED) {
        Pheromone::Home
    } else {
        Pheromone::Food
    }
}

/// Choose the next cell for an ant standing at `pos`.
///
/// Walls, water and off-grid cells are never candidates. When `follow` is set
/// the ant climbs to the strongest `kind` neighbour that beats its own cell,
/// breaking ties uniformly at random; without such a neighbour, or when not
/// following, it picks a uniformly random candidate. Returns the target and
/// whether the gradient was followed, or `None` when boxed in.
pub fn choose_next_position(
    grid: &Grid,
    field: &FieldEngine,
    pos: Position,
    kind: Pheromone,
    follow: bool,
    rng: &mut fastrand::Rng,
) -> Option<(Position, bool)> {
    let mut opts = [Position::default(); 8];
    let mut k = 0usize;
    for (_, p) in grid.neighbors(pos) {
        if grid.cell(p).is_some_and(|c| c.is_passable()) {
            opts[k] = p;
            k += 1;
        }
    }
    if k == 0 {
        return None;
    }

    if follow {
        let here = field.query(grid, pos, kind);
        let best = opts[..k]
            .iter()
            .map(|&p| field.query(grid, p, kind))
            .fold(here, f32::max);

        if best > here {
            let mut ties = [Position::default(); 8];
            let mut t = 0usize;
            for &p in &opts[..k] {
                if field.query(grid, p, kind) == best {
                    ties[t] = p;
                    t += 1;
                }
            }
            return Some((ties[rng.usize(..t)], true));
        }
    }

    Some((opts[rng.usize(..k)], false))
}

/// Run one step of the foraging policy for `ant`
pub fn advance(
    ant: &mut Ant,
    grid: &mut Grid,
    field: &FieldEngine,
    config: &AntConfig,
    rng: &mut fastrand::Rng,
) -> Outcome {
    if ant.is_dead() {
        return Outcome::Inert;
    }
    if !ant.burn_energy(config.energy_per_step) {
        debug!(ant = ant.id, colony = ant.colony_id, pos = %ant.pos, "ant starved");
        return Outcome::Died;
    }
    ant.steps_taken += 1;
    if ant.energy <= config.tired_threshold {
        ant.state.insert(StateFlags::TIRED);
    }

    let follow = rng.f32() >= ant.exploration_rate;
    let kind = steering_trail(ant.state);
    let moved = match choose_next_position(grid, field, ant.pos, kind, follow, rng) {
        Some((next, followed)) => {
            trace!(
                ant = ant.id,
                from = %ant.pos,
                to = %next,
                trail = kind.as_str(),
                followed,
                "ant moved"
            );
            ant.move_to(next);
            ant.state.set(StateFlags::FOLLOWING, followed);
            true
        }
        None => {
            ant.state.remove(StateFlags::FOLLOWING);
            false
        }
    };

    // Pickup and delivery happen on arrival only
    let mut outcome = Outcome::Foraged;
    if let Some(cell) = grid.cell_mut(ant.pos).filter(|_| moved) {
        if ant.state.contains(StateFlags::SEARCHING) && !ant.is_carrying() {
            if cell.take_food() {
                ant.pick_up();
                debug!(ant = ant.id, colony = ant.colony_id, pos = %ant.pos, "picked up food");
                outcome = Outcome::PickedUp;
            }
        } else if ant.state.contains(StateFlags::RETURNING | StateFlags::CARRYING)
            && cell.is_nest_of(ant.colony_id)
        {
            ant.deliver(config);
            debug!(ant = ant.id, colony = ant.colony_id, "delivered food");
            outcome = Outcome::Delivered;
        }
    }

    if ant.state.contains(StateFlags::SEARCHING) {
        field.deposit(grid, ant.pos, Pheromone::Home, ant.pheromone_strength);
    } else if ant.state.contains(StateFlags::RETURNING) {
        field.deposit(grid, ant.pos, Pheromone::Food, ant.pheromone_strength);
    }

    let strength = field.query(grid, ant.pos, steering_trail(ant.state));
    ant.path.push(ant.pos, strength);

    outcome
}
