use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

/// Returns `tile` unchanged when it lies on the board bounded by `max_tile`.
pub fn validate_tile(tile: Tile, max_tile: Tile) -> Result<Tile> {
    if tile.is_within(max_tile) {
        Ok(tile)
    } else {
        Err(GameError::OutOfBoundsTile { tile, max_tile })
    }
}

/// The in-bounds 8-neighbors of `tile`, starting up-left and going clockwise.
pub fn adjacent_tiles(tile: Tile, max_tile: Tile) -> Result<Vec<Tile>> {
    let tile = validate_tile(tile, max_tile)?;
    Ok(NeighborIter::new(tile, max_tile).collect())
}

/// Whether none of the neighbors of `tile` is a mine. The tile itself is not
/// checked.
pub fn is_safe(tile: Tile, max_tile: Tile, mines: &BTreeSet<Tile>) -> Result<bool> {
    let tile = validate_tile(tile, max_tile)?;
    Ok(!NeighborIter::new(tile, max_tile).any(|neighbor| mines.contains(&neighbor)))
}

/// Linear scan for a mine with the same coordinates as `tile`.
pub fn mine_is_on_board<'a>(tile: Tile, mines: impl IntoIterator<Item = &'a Tile>) -> bool {
    mines.into_iter().any(|&mine| mine == tile)
}

/// Grid bounds plus the mine, flag and reveal sets of a single game.
///
/// Deserialization rebuilds the board through the same checks as play, so a
/// record with off-board tiles or a revealed mine is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct Board {
    max_tile: Tile,
    mines: BTreeSet<Tile>,
    flags: BTreeSet<Tile>,
    reveals: BTreeSet<Tile>,
}

impl Board {
    /// Empty board with no mines, flags or reveals.
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        if mult(rows, cols).is_none() {
            return Err(GameError::InvalidConfiguration {
                rows,
                cols,
                mines: 0,
            });
        }
        Ok(Self {
            max_tile: Tile::new(rows, cols),
            mines: BTreeSet::new(),
            flags: BTreeSet::new(),
            reveals: BTreeSet::new(),
        })
    }

    pub fn rows(&self) -> Coord {
        self.max_tile.row
    }

    pub fn cols(&self) -> Coord {
        self.max_tile.col
    }

    /// Exclusive upper bound of the board.
    pub fn max_tile(&self) -> Tile {
        self.max_tile
    }

    pub fn mines(&self) -> &BTreeSet<Tile> {
        &self.mines
    }

    pub fn flags(&self) -> &BTreeSet<Tile> {
        &self.flags
    }

    pub fn reveals(&self) -> &BTreeSet<Tile> {
        &self.reveals
    }

    pub fn total_tiles(&self) -> TileCount {
        mult(self.rows(), self.cols()).unwrap_or_default()
    }

    pub fn contains(&self, tile: Tile) -> bool {
        tile.is_within(self.max_tile)
    }

    pub fn validate_tile(&self, tile: Tile) -> Result<Tile> {
        validate_tile(tile, self.max_tile)
    }

    pub fn has_mine_at(&self, tile: Tile) -> bool {
        mine_is_on_board(tile, &self.mines)
    }

    pub fn is_revealed(&self, tile: Tile) -> bool {
        self.reveals.contains(&tile)
    }

    pub fn is_flagged(&self, tile: Tile) -> bool {
        self.flags.contains(&tile)
    }

    /// Safe tiles that still have to be revealed for the game to be won.
    pub fn remaining_safe_tiles(&self) -> TileCount {
        let covered = self.mines.len() + self.reveals.len();
        let covered = TileCount::try_from(covered).unwrap_or(TileCount::MAX);
        self.total_tiles().saturating_sub(covered)
    }

    pub fn adjacent_tiles(&self, tile: Tile) -> Result<Vec<Tile>> {
        adjacent_tiles(tile, self.max_tile)
    }

    pub fn is_safe(&self, tile: Tile) -> Result<bool> {
        is_safe(tile, self.max_tile, &self.mines)
    }

    /// Number of mines among the neighbors of `tile`.
    pub fn adjacent_mine_count(&self, tile: Tile) -> Result<u8> {
        let tile = self.validate_tile(tile)?;
        let count = NeighborIter::new(tile, self.max_tile)
            .filter(|neighbor| self.mines.contains(neighbor))
            .count();
        // at most 8 neighbors
        Ok(count as u8)
    }

    /// Tiles a sweep of the safe `start` tile would reveal.
    pub fn reveal(&self, start: Tile) -> Result<BTreeSet<Tile>> {
        reveal(start, self.max_tile, &self.mines)
    }

    /// Installs the mine layout. Every mine must be on the board and none may
    /// coincide with an already revealed tile.
    pub(crate) fn place_mines(&mut self, mines: impl IntoIterator<Item = Tile>) -> Result<()> {
        let mut placed = BTreeSet::new();
        for mine in mines {
            let mine = self.validate_tile(mine)?;
            if self.is_revealed(mine) || !placed.insert(mine) {
                return Err(GameError::InvalidConfiguration {
                    rows: self.rows(),
                    cols: self.cols(),
                    mines: TileCount::try_from(placed.len()).unwrap_or(TileCount::MAX),
                });
            }
        }
        self.mines = placed;
        Ok(())
    }

    /// Merges `tiles` into the reveal set. Off-board tiles are rejected and
    /// leave the board untouched. Mines are never revealed; callers check the
    /// swept tile before computing the region.
    pub(crate) fn apply_reveal(&mut self, tiles: BTreeSet<Tile>) -> Result<()> {
        for &tile in &tiles {
            self.validate_tile(tile)?;
        }
        for tile in tiles {
            let mined = self.mines.contains(&tile);
            if mined {
                log::warn!("Skipping reveal of mined tile {tile}");
            }
            debug_assert!(!mined, "reveal region contains mine at {tile}");
            if !mined {
                self.reveals.insert(tile);
            }
        }
        Ok(())
    }

    pub(crate) fn toggle_flag(&mut self, tile: Tile) -> Result<MarkOutcome> {
        let tile = self.validate_tile(tile)?;
        if self.is_revealed(tile) {
            return Ok(MarkOutcome::NoChange);
        }
        if !self.flags.remove(&tile) {
            self.flags.insert(tile);
        }
        Ok(MarkOutcome::Changed)
    }
}

/// Wire shape of [`Board`], checked before it becomes one.
#[derive(Deserialize)]
struct BoardRecord {
    max_tile: Tile,
    mines: BTreeSet<Tile>,
    flags: BTreeSet<Tile>,
    reveals: BTreeSet<Tile>,
}

impl TryFrom<BoardRecord> for Board {
    type Error = GameError;

    fn try_from(record: BoardRecord) -> Result<Self> {
        let mut board = Board::new(record.max_tile.row, record.max_tile.col)?;
        board.place_mines(record.mines)?;

        for &tile in &record.reveals {
            if board.has_mine_at(board.validate_tile(tile)?) {
                return Err(GameError::InvalidConfiguration {
                    rows: board.rows(),
                    cols: board.cols(),
                    mines: TileCount::try_from(board.mines.len()).unwrap_or(TileCount::MAX),
                });
            }
        }
        board.apply_reveal(record.reveals)?;

        for &flag in &record.flags {
            board.validate_tile(flag)?;
        }
        board.flags = record.flags;
        Ok(board)
    }
}
