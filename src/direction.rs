use crate::world::Position;

/// The 8 Moore-neighbourhood directions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All possible directions
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Grid offset `(dx, dy)`; y grows downwards
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Position one step from `pos` in this direction (may be out of bounds)
    #[inline]
    pub fn step_from(self, pos: Position) -> Position {
        let (dx, dy) = self.offset();
        Position::new(pos.x + dx, pos.y + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_cover_moore_neighbourhood() {
        let mut offsets: Vec<(i32, i32)> = Direction::ALL.iter().map(|d| d.offset()).collect();
        offsets.sort();
        offsets.dedup();

        assert_eq!(offsets.len(), 8);
        assert!(!offsets.contains(&(0, 0)));
        for (dx, dy) in offsets {
            assert!(dx.abs() <= 1 && dy.abs() <= 1);
        }
    }

    #[test]
    fn test_step_from() {
        let origin = Position::new(3, 3);
        assert_eq!(Direction::North.step_from(origin), Position::new(3, 2));
        assert_eq!(Direction::SouthWest.step_from(origin), Position::new(2, 4));
    }
}
