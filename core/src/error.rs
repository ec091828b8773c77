use thiserror::Error;

use crate::{Coord, Tile, TileCount};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {rows}x{cols} board cannot hold {mines} mines")]
    InvalidConfiguration {
        rows: Coord,
        cols: Coord,
        mines: TileCount,
    },
    #[error("Tile {tile} is outside of the board bounded by {max_tile}")]
    OutOfBoundsTile { tile: Tile, max_tile: Tile },
}

pub type Result<T> = core::result::Result<T, GameError>;
