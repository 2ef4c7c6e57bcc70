pub mod cell;
pub mod grid;
pub mod parser;
pub mod world;

pub use cell::{Cell, Position, Terrain, UNLIMITED_FOOD};
pub use grid::Grid;
pub use parser::{parse_map, parse_map_from_str};
pub use world::{RunState, World};
