use crate::Tile;

/// Single coordinate axis used for rows, columns and board bounds.
///
/// Signed so ring generation can step past the board edge before the
/// off-board tiles are filtered out.
pub type Coord = i32;

/// Count type used for mine counts and total-tile counts.
pub type TileCount = u32;

/// Number of tiles on a `rows` x `cols` board, `None` when either side is not
/// positive or the product does not fit in [`TileCount`].
pub fn mult(rows: Coord, cols: Coord) -> Option<TileCount> {
    let rows = TileCount::try_from(rows).ok().filter(|&r| r > 0)?;
    let cols = TileCount::try_from(cols).ok().filter(|&c| c > 0)?;
    rows.checked_mul(cols)
}

/// Neighbor offsets `(row, col)` in enumeration order: up-left, up, up-right,
/// right, down-right, down, down-left, left.
const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Iterator over the in-bounds 8-neighbors of a tile.
#[derive(Debug)]
pub struct NeighborIter {
    center: Tile,
    bounds: Tile,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Tile, bounds: Tile) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Tile;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &(d_row, d_col) = DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = self.center.offset(d_row, d_col);
            if next_item.is_within(self.bounds) {
                return Some(next_item);
            }
        }
    }
}
