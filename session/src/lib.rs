//! Session bookkeeping around a [`GameController`]: a random session id and
//! the `{"id": ...}` record written once when a game starts.

use ringsweep_core::{GameConfig, GameController, GameError, RandomSource};
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// File the session record is written to when no other path is given.
pub const DEFAULT_SESSION_FILE: &str = "mine_game.json";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid session id {0:?}, expected {len} letters A-Z", len = SessionId::LEN)]
    InvalidId(String),
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed session record: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, SessionError>;

/// Sixteen uppercase ASCII letters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionId(String);

impl SessionId {
    pub const LEN: usize = 16;

    pub fn generate<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let id = (0..Self::LEN)
            .map(|_| char::from(b'A' + (rng.next_in_range(26) % 26) as u8))
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(id: &str) -> bool {
        id.len() == Self::LEN && id.bytes().all(|b| b.is_ascii_uppercase())
    }
}

impl TryFrom<String> for SessionId {
    type Error = SessionError;

    fn try_from(id: String) -> Result<Self> {
        if Self::is_valid(&id) {
            Ok(Self(id))
        } else {
            Err(SessionError::InvalidId(id))
        }
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

impl FromStr for SessionId {
    type Err = SessionError;

    fn from_str(id: &str) -> Result<Self> {
        Self::try_from(id.to_owned())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The persisted session artifact. The engine never reads it back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
}

impl SessionRecord {
    pub fn new(id: SessionId) -> Self {
        Self { id }
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, serde_json::to_string(self)?)?;
        log::info!("Wrote session {} to {}", self.id, path.display());
        Ok(())
    }

    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// A running game together with its session record.
#[derive(Debug)]
pub struct Session {
    pub record: SessionRecord,
    pub game: GameController,
    pub path: PathBuf,
}

impl Session {
    /// Builds the controller first, then persists a fresh session record to
    /// `path`. A rejected configuration writes nothing.
    pub fn start<R>(config: GameConfig, rng: &mut R, path: impl Into<PathBuf>) -> Result<Self>
    where
        R: RandomSource + ?Sized,
    {
        let game = GameController::new(config, &mut *rng)?;
        let record = SessionRecord::new(SessionId::generate(rng));
        let path = path.into();
        record.write_to(&path)?;
        Ok(Self { record, game, path })
    }

    /// [`Session::start`] writing to [`DEFAULT_SESSION_FILE`] in the working
    /// directory.
    pub fn start_default<R>(config: GameConfig, rng: &mut R) -> Result<Self>
    where
        R: RandomSource + ?Sized,
    {
        Self::start(config, rng, DEFAULT_SESSION_FILE)
    }

    pub fn id(&self) -> &SessionId {
        &self.record.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::SmallRng};
    use ringsweep_core::{GameState, Tile};
    use std::{env, process};

    fn scratch_file(name: &str) -> PathBuf {
        env::temp_dir().join(format!("ringsweep-{}-{name}.json", process::id()))
    }

    #[test]
    fn generated_ids_are_sixteen_uppercase_letters() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..32 {
            let id = SessionId::generate(&mut rng);
            assert_eq!(id.as_str().len(), 16);
            assert!(id.as_str().bytes().all(|b| b.is_ascii_uppercase()));
        }
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!("ABCDEFGHIJKLMNOP".parse::<SessionId>().is_ok());
        assert!("ABCDEFGHIJKLMNO".parse::<SessionId>().is_err());
        assert!("abcdefghijklmnop".parse::<SessionId>().is_err());
        assert!("ABCDEFGHIJKLMNO1".parse::<SessionId>().is_err());
    }

    #[test]
    fn record_serializes_as_id_object() {
        let record = SessionRecord::new("QWERTYUIOPASDFGH".parse().unwrap());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":"QWERTYUIOPASDFGH"}"#);

        let parsed: SessionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn record_with_bad_id_fails_to_parse() {
        let result: serde_json::Result<SessionRecord> = serde_json::from_str(r#"{"id":"short"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn starting_a_session_writes_the_record() {
        let path = scratch_file("start");
        let mut rng = SmallRng::seed_from_u64(11);
        let config = GameConfig::new(10, 10, 1).unwrap();

        let session = Session::start(config, &mut rng, &path).unwrap();

        assert_eq!(session.game.status(), GameState::Open);
        assert_eq!(SessionRecord::read_from(&path).unwrap().id, *session.id());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn rejected_config_writes_nothing() {
        let path = scratch_file("rejected");
        let mut rng = SmallRng::seed_from_u64(11);

        let result = Session::start(GameConfig::new_unchecked(1, 1, 1), &mut rng, &path);

        assert!(matches!(result, Err(SessionError::Game(_))));
        assert!(!path.exists());
    }

    #[test]
    fn session_game_is_playable() {
        let path = scratch_file("playable");
        let mut rng = SmallRng::seed_from_u64(5);
        let mut session =
            Session::start(GameConfig::new(1, 2, 0).unwrap(), &mut rng, &path).unwrap();

        session.game.sweep(Tile::new(0, 1)).unwrap();

        assert_eq!(session.game.status(), GameState::Won);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn default_session_is_written_to_the_working_directory() {
        let dir = env::temp_dir().join(format!("ringsweep-{}-cwd", process::id()));
        fs::create_dir_all(&dir).unwrap();
        env::set_current_dir(&dir).unwrap();
        let mut rng = SmallRng::seed_from_u64(9);

        let session = Session::start_default(GameConfig::new(3, 3, 2).unwrap(), &mut rng).unwrap();

        assert_eq!(session.path, PathBuf::from(DEFAULT_SESSION_FILE));
        let record = SessionRecord::read_from(dir.join(DEFAULT_SESSION_FILE)).unwrap();
        assert_eq!(record.id, *session.id());
        fs::remove_dir_all(&dir).unwrap();
    }
}
