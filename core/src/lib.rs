//! Rules engine for a single Minesweeper board.
//!
//! [`GameController`] owns one [`Board`] and answers what happens when the
//! player sweeps a tile. The board helpers ([`populate`], [`adjacent_tiles`],
//! [`is_safe`], [`reveal`], ...) are free functions over tiles, bounds and mine
//! sets so they can be used and tested on their own.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use tile::*;
pub use types::*;

mod board;
mod engine;
mod error;
mod generator;
mod reveal;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: TileCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, mines: TileCount) -> Self {
        Self { rows, cols, mines }
    }

    /// Validated configuration: both sides positive and at least one tile left
    /// free of mines.
    pub fn new(rows: Coord, cols: Coord, mines: TileCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, cols, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match mult(self.rows, self.cols) {
            Some(total) if self.mines < total => Ok(()),
            _ => {
                log::warn!(
                    "Rejecting {}x{} board with {} mines",
                    self.rows,
                    self.cols,
                    self.mines
                );
                Err(GameError::InvalidConfiguration {
                    rows: self.rows,
                    cols: self.cols,
                    mines: self.mines,
                })
            }
        }
    }

    /// Exclusive upper bound of the board.
    pub const fn max_tile(&self) -> Tile {
        Tile::new(self.rows, self.cols)
    }

    pub fn total_tiles(&self) -> TileCount {
        mult(self.rows, self.cols).unwrap_or_default()
    }

    pub fn safe_tiles(&self) -> TileCount {
        self.total_tiles().saturating_sub(self.mines)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
