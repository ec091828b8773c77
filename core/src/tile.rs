use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};

use crate::Coord;

/// A `(row, col)` position on the board, compared and hashed by value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub row: Coord,
    pub col: Coord,
}

impl Tile {
    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Shifts the tile by the given deltas without any bounds clipping.
    pub const fn offset(self, d_row: Coord, d_col: Coord) -> Self {
        Self {
            row: self.row.saturating_add(d_row),
            col: self.col.saturating_add(d_col),
        }
    }

    /// Whether the tile lies in `[0, max_tile.row) x [0, max_tile.col)`.
    pub const fn is_within(self, max_tile: Tile) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < max_tile.row && self.col < max_tile.col
    }
}

impl From<(Coord, Coord)> for Tile {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Horizontal,
    Vertical,
}

/// `length` consecutive tiles starting at `start`, stepping the column
/// ([`Direction::Horizontal`]) or the row ([`Direction::Vertical`]).
///
/// Tiles are not clipped to any board, callers filter afterwards.
pub fn line(start: Tile, length: Coord, direction: Direction) -> impl Iterator<Item = Tile> {
    (0..length).map(move |step| match direction {
        Direction::Horizontal => start.offset(0, step),
        Direction::Vertical => start.offset(step, 0),
    })
}

/// Perimeter of the `size` x `size` square whose top-left corner is `top_left`.
pub fn square(top_left: Tile, size: Coord) -> BTreeSet<Tile> {
    if size <= 0 {
        return BTreeSet::new();
    }
    let far = size - 1;

    line(top_left, size, Direction::Horizontal)
        .chain(line(top_left.offset(far, 0), size, Direction::Horizontal))
        .chain(line(top_left, size, Direction::Vertical))
        .chain(line(top_left.offset(0, far), size, Direction::Vertical))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_coordinates_are_equal_tiles() {
        assert_eq!(Tile::new(2, 3), Tile::from((2, 3)));
        assert_ne!(Tile::new(2, 3), Tile::new(3, 2));

        let set = BTreeSet::from([Tile::new(1, 1), Tile::new(1, 1)]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn tile_serializes_as_row_and_col() {
        let json = serde_json::to_string(&Tile::new(4, 7)).unwrap();
        assert_eq!(json, r#"{"row":4,"col":7}"#);
    }

    #[test]
    fn is_within_rejects_negative_and_upper_bound() {
        let max = Tile::new(3, 2);
        assert!(Tile::new(0, 0).is_within(max));
        assert!(Tile::new(2, 1).is_within(max));
        assert!(!Tile::new(-1, 0).is_within(max));
        assert!(!Tile::new(3, 0).is_within(max));
        assert!(!Tile::new(0, 2).is_within(max));
    }

    #[test]
    fn line_of_zero_is_empty() {
        assert_eq!(line(Tile::new(4, 4), 0, Direction::Vertical).count(), 0);
    }

    #[test]
    fn line_of_one_is_start() {
        let tiles: Vec<_> = line(Tile::new(4, 4), 1, Direction::Horizontal).collect();
        assert_eq!(tiles, [Tile::new(4, 4)]);
    }

    #[test]
    fn line_steps_a_single_axis() {
        let horizontal: Vec<_> = line(Tile::new(1, -1), 3, Direction::Horizontal).collect();
        assert_eq!(horizontal, [Tile::new(1, -1), Tile::new(1, 0), Tile::new(1, 1)]);

        let vertical: Vec<_> = line(Tile::new(1, -1), 3, Direction::Vertical).collect();
        assert_eq!(vertical, [Tile::new(1, -1), Tile::new(2, -1), Tile::new(3, -1)]);
    }

    #[test]
    fn square_of_one_is_its_corner() {
        assert_eq!(square(Tile::new(2, 2), 1), BTreeSet::from([Tile::new(2, 2)]));
    }

    #[test]
    fn square_is_perimeter_only() {
        let ring = square(Tile::new(0, 0), 3);

        assert_eq!(ring.len(), 8);
        assert!(!ring.contains(&Tile::new(1, 1)));
        assert!(ring.contains(&Tile::new(2, 2)));
        assert!(ring.contains(&Tile::new(0, 2)));
    }

    #[test]
    fn square_perimeter_size_matches_side() {
        for size in 2..10 {
            assert_eq!(square(Tile::new(-3, 5), size).len(), 4 * (size as usize - 1));
        }
    }
}
