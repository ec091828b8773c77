use std::collections::BTreeSet;

use crate::*;

/// Tiles revealed by sweeping `start`, which the caller has already checked
/// is not a mine.
///
/// The region grows in square rings of Chebyshev radius 1, 2, 3, ... around
/// `start`. Every on-board, mine-free tile of a ring is accepted, whether or
/// not it touches a previously accepted tile. Growth stops at the first ring
/// that contributes nothing, or once the ring lies entirely outside the board.
///
/// ```text
/// 2 2 2 2 2
/// 2 1 1 1 2
/// 2 1 o 1 2
/// 2 1 1 1 2
/// 2 2 2 2 2
/// ```
pub fn reveal(start: Tile, max_tile: Tile, mines: &BTreeSet<Tile>) -> Result<BTreeSet<Tile>> {
    let start = validate_tile(start, max_tile)?;
    let mut revealed = BTreeSet::from([start]);

    // any ring at or beyond the longest side is off-board
    let max_radius = max_tile.row.max(max_tile.col);
    for radius in 1..max_radius {
        if ring_exceeds_board(start, radius, max_tile) {
            break;
        }

        let side = radius.saturating_mul(2).saturating_add(1);
        let ring: Vec<Tile> = square(start.offset(-radius, -radius), side)
            .into_iter()
            .filter(|tile| tile.is_within(max_tile) && !mines.contains(tile))
            .collect();
        if ring.is_empty() {
            break;
        }

        log::trace!("Ring {radius} around {start} accepted {} tiles", ring.len());
        revealed.extend(ring);
    }

    Ok(revealed)
}

/// Whether the ring of `radius` around `center` reaches past every edge of the
/// board, leaving none of its tiles on the board.
fn ring_exceeds_board(center: Tile, radius: Coord, max_tile: Tile) -> bool {
    let top_left = center.offset(-radius, -radius);
    let bottom_right = center.offset(radius, radius);
    top_left.row < 0
        && top_left.col < 0
        && bottom_right.row >= max_tile.row
        && bottom_right.col >= max_tile.col
}
