use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Open,
    Lost,
    Won,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost | Self::Won)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Open
    }
}

/// One board and its game state. Sweeps go through [`GameController::sweep`],
/// which is the only place the reveal set and the state change.
///
/// Sweeps mutate without internal locking; callers sharing a controller must
/// serialize them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ControllerRecord")]
pub struct GameController {
    config: GameConfig,
    board: Board,
    status: GameState,
}

impl GameController {
    /// Starts a game with `config.mines` mines placed at random.
    pub fn new<R>(config: GameConfig, rng: &mut R) -> Result<Self>
    where
        R: RandomSource + ?Sized,
    {
        let mines = RandomMinefieldGenerator::new(rng).generate(config)?;
        Self::from_parts(config, mines)
    }

    /// Starts a game on a `rows` x `cols` board with the given mine layout.
    ///
    /// Mines must be distinct and on the board. Nothing is drawn at random, so
    /// unlike [`GameController::new`] a board with no safe tile is accepted.
    pub fn with_mines(rows: Coord, cols: Coord, mines: &[Tile]) -> Result<Self> {
        let mine_count = TileCount::try_from(mines.len()).unwrap_or(TileCount::MAX);
        let config = GameConfig::new_unchecked(rows, cols, mine_count);
        Self::from_parts(config, mines.iter().copied())
    }

    fn from_parts(config: GameConfig, mines: impl IntoIterator<Item = Tile>) -> Result<Self> {
        let mut board = Board::new(config.rows, config.cols)?;
        board.place_mines(mines)?;
        log::debug!(
            "New {}x{} game with {} mines",
            config.rows,
            config.cols,
            config.mines
        );
        Ok(Self {
            config,
            board,
            status: GameState::default(),
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameState {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn mine_count(&self) -> TileCount {
        self.config.mines
    }

    /// Sweeps `tile`: a mine loses the game, anything else reveals the region
    /// around it and wins once no safe tile is left covered.
    ///
    /// Re-sweeping a revealed tile and sweeping after the game has ended leave
    /// everything unchanged.
    pub fn sweep(&mut self, tile: Tile) -> Result<&Board> {
        let tile = self.board.validate_tile(tile)?;

        if self.status.is_finished() {
            log::debug!("Ignoring sweep of {tile}, game is already {:?}", self.status);
            return Ok(&self.board);
        }
        if self.board.is_revealed(tile) {
            return Ok(&self.board);
        }

        if self.board.has_mine_at(tile) {
            log::debug!("Swept mine at {tile}, game lost");
            self.status = GameState::Lost;
            return Ok(&self.board);
        }

        let revealed = self.board.reveal(tile)?;
        self.board.apply_reveal(revealed)?;

        if self.board.remaining_safe_tiles() == 0 {
            log::debug!("Every safe tile revealed, game won");
            self.status = GameState::Won;
        }
        Ok(&self.board)
    }

    /// Flags or unflags a covered tile. Flags are bookkeeping only and never
    /// affect sweeping or winning.
    pub fn toggle_flag(&mut self, tile: Tile) -> Result<MarkOutcome> {
        let tile = self.board.validate_tile(tile)?;
        if self.status.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }
        self.board.toggle_flag(tile)
    }
}

/// Wire shape of [`GameController`]. The board validates itself; the record
/// must also agree with its config and state.
#[derive(Deserialize)]
struct ControllerRecord {
    config: GameConfig,
    board: Board,
    status: GameState,
}

impl TryFrom<ControllerRecord> for GameController {
    type Error = GameError;

    fn try_from(record: ControllerRecord) -> Result<Self> {
        let ControllerRecord {
            config,
            board,
            status,
        } = record;

        let mine_count = TileCount::try_from(board.mines().len()).unwrap_or(TileCount::MAX);
        let consistent = board.max_tile() == config.max_tile()
            && mine_count == config.mines
            && (status != GameState::Won || board.remaining_safe_tiles() == 0);
        if !consistent {
            return Err(GameError::InvalidConfiguration {
                rows: config.rows,
                cols: config.cols,
                mines: config.mines,
            });
        }

        Ok(Self {
            config,
            board,
            status,
        })
    }
}
