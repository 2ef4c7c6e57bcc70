use crate::config::MAX_WORLD_SIZE;
use crate::error::{Result, SimError};
use crate::world::cell::{Cell, Position, Terrain, UNLIMITED_FOOD};
use crate::world::grid::Grid;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Cell for one map glyph; `None` for unknown glyphs
fn cell_for(glyph: char, food_per_source: u32) -> Option<Cell> {
    match glyph {
        '.' => Some(Cell::new(Terrain::Empty)),
        '#' => Some(Cell::new(Terrain::Wall)),
        '~' => Some(Cell::new(Terrain::Water)),
        'F' => Some(Cell::food(food_per_source)),
        '*' => Some(Cell::food(UNLIMITED_FOOD)),
        '0'..='9' => glyph.to_digit(10).map(Cell::nest),
        _ => None,
    }
}

/// Parse a map file: one row per line, see [`parse_map_from_str`] for glyphs
pub fn parse_map<P: AsRef<Path>>(path: P, food_per_source: u32) -> Result<Grid> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(64 * 1024, file);

    let mut rows = Vec::with_capacity(64);
    for line in reader.lines() {
        rows.push(line?);
    }
    build_grid(rows.iter().map(String::as_str), food_per_source)
}

/// Parse a map held in memory.
///
/// Glyphs: `.` empty, `#` wall, `~` water, `F` food source holding
/// `food_per_source` units, `*` inexhaustible food, `0`-`9` nest of that
/// colony. Blank lines and lines starting with `;` are skipped.
pub fn parse_map_from_str(src: &str, food_per_source: u32) -> Result<Grid> {
    build_grid(src.lines(), food_per_source)
}

fn build_grid<'a>(lines: impl Iterator<Item = &'a str>, food_per_source: u32) -> Result<Grid> {
    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for (lineno, raw) in lines.enumerate() {
        let line = raw.trim_end();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        let row = line
            .chars()
            .enumerate()
            .map(|(col, ch)| {
                cell_for(ch, food_per_source).ok_or_else(|| {
                    SimError::invalid_map(format!(
                        "unknown glyph {:?} at line {}, column {}",
                        ch,
                        lineno + 1,
                        col + 1
                    ))
                })
            })
            .collect::<Result<Vec<Cell>>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(SimError::invalid_map(format!(
                    "line {} has {} cells, expected {}",
                    lineno + 1,
                    row.len(),
                    first.len()
                )));
            }
        }
        rows.push(row);
    }

    let height = rows.len();
    let width = rows.first().map_or(0, Vec::len);
    if width == 0 || height == 0 {
        return Err(SimError::invalid_map("map is empty"));
    }
    if width > MAX_WORLD_SIZE || height > MAX_WORLD_SIZE {
        return Err(SimError::invalid_map(format!(
            "map is {}x{}, limit is {}",
            width, height, MAX_WORLD_SIZE
        )));
    }

    let mut grid = Grid::new(width, height)?;
    for (y, row) in rows.into_iter().enumerate() {
        for (x, cell) in row.into_iter().enumerate() {
            grid.set(Position::new(x as i32, y as i32), cell);
        }
    }

    let nests = grid.nests();
    for (expected, (id, pos)) in nests.iter().enumerate() {
        if *id as usize != expected {
            return Err(SimError::invalid_map(format!(
                "nest {} at {} breaks the 0.. colony numbering or repeats an id",
                id, pos
            )));
        }
    }

    Ok(grid)
}
