//! Saving and loading [`GameState`] per player identity.
//!
//! State is stored as JSON under `"tilerush_state_" + uid` (or `"guest"`). Signed-in
//! players use a [`FileStore`] that outlives the process; guests use a
//! [`MemoryStore`] that lives as long as their session and is wiped with
//! [`clear_guest_state`] when it ends.

use std::{
    collections::BTreeMap,
    fmt, fs, io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use tilerush_generator::BoardGenerator;

use crate::{GameState, GiveUpOutcome, PersistError, PuzzleSession, SolveOutcome, Stage};

/// Prefix of every storage key.
pub const STORAGE_KEY_PREFIX: &str = "tilerush_state_";

const GUEST_ID: &str = "guest";

/// Who the progress belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum Identity {
    /// A signed-in player with a stable identifier.
    User(String),
    /// An anonymous player whose progress lasts for one session.
    Guest,
}

impl Identity {
    /// Returns the identity for an optional user id.
    #[must_use]
    pub fn from_uid(uid: Option<String>) -> Self {
        uid.filter(|uid| !uid.is_empty())
            .map_or(Self::Guest, Self::User)
    }

    /// Returns the storage key for this identity.
    #[must_use]
    pub fn storage_key(&self) -> String {
        let id = match self {
            Self::User(uid) => uid.as_str(),
            Self::Guest => GUEST_ID,
        };
        format!("{STORAGE_KEY_PREFIX}{id}")
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(uid) => f.write_str(uid),
            Self::Guest => f.write_str(GUEST_ID),
        }
    }
}

/// A string key-value store holding serialized game state.
pub trait StateStore {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the backend cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;

    /// Returns every stored key.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::Io`] if the backend cannot be listed.
    fn keys(&self) -> Result<Vec<String>, PersistError>;
}

impl<S> StateStore for Box<S>
where
    S: StateStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, PersistError> {
        (**self).keys()
    }
}

/// In-memory store for session-scoped (guest) state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, PersistError> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// File-backed store: one `<key>.json` file per key in a directory.
///
/// Keys are percent-encoded into file names: bytes other than ASCII letters, digits,
/// `-`, `_` and `.` become `%XX`, so a key never names a path outside the directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    const EXTENSION: &'static str = "json";

    /// Creates a store in `dir`. The directory is created on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the platform's local data directory for TileRush.
    #[must_use]
    pub fn default_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tilerush")
    }

    /// Creates a store in [`FileStore::default_dir`].
    #[must_use]
    pub fn open_default() -> Self {
        Self::new(Self::default_dir())
    }

    /// Returns the store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", encode_file_stem(key), Self::EXTENSION))
    }
}

fn encode_file_stem(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            stem.push(char::from(byte));
        } else {
            stem.push_str(&format!("%{byte:02X}"));
        }
    }
    stem
}

fn decode_file_stem(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&byte, tail)) = rest.split_first() {
        if byte == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(byte);
            rest = tail;
        }
    }
    String::from_utf8(bytes).ok()
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>, PersistError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == Self::EXTENSION)
                && let Some(key) = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(decode_file_stem)
            {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Loads the state saved for `identity`.
///
/// Missing state yields [`GameState::default`]. State that cannot be read or parsed
/// is treated as missing, with a warning logged.
#[must_use]
pub fn load_game_state<S>(store: &S, identity: &Identity) -> GameState
where
    S: StateStore + ?Sized,
{
    let key = identity.storage_key();
    let raw = match store.get(&key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return GameState::default(),
        Err(err) => {
            log::warn!("failed to read saved game state `{key}`, starting fresh: {err}");
            return GameState::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("failed to parse saved game state `{key}`, starting fresh: {err}");
            GameState::default()
        }
    }
}

/// Saves `state` for `identity`, replacing what was there.
///
/// # Errors
///
/// Returns [`PersistError`] if the state cannot be encoded or written.
pub fn save_game_state<S>(
    store: &mut S,
    identity: &Identity,
    state: &GameState,
) -> Result<(), PersistError>
where
    S: StateStore + ?Sized,
{
    let json = serde_json::to_string(state)?;
    store.set(&identity.storage_key(), &json)
}

/// Removes every TileRush key from a session store. Returns the number removed.
///
/// # Errors
///
/// Returns [`PersistError`] if the store cannot be listed or written.
pub fn clear_guest_state<S>(store: &mut S) -> Result<usize, PersistError>
where
    S: StateStore + ?Sized,
{
    let keys: Vec<String> = store
        .keys()?
        .into_iter()
        .filter(|key| key.starts_with(STORAGE_KEY_PREFIX))
        .collect();
    for key in &keys {
        store.remove(key)?;
    }
    Ok(keys.len())
}

/// Owns a player's [`GameState`] and saves it after every change.
///
/// Each mutating method updates the in-memory state first and then writes it; an
/// `Err` means only that the write failed.
///
/// # Examples
///
/// ```
/// use tilerush_game::{Identity, MemoryStore, ProgressTracker, Stage, load_game_state};
///
/// let mut tracker = ProgressTracker::open(MemoryStore::new(), Identity::User("ada".into()));
/// tracker.record_solve(42.0, Stage::THREE)?;
///
/// let saved = load_game_state(tracker.store(), tracker.identity());
/// assert_eq!(saved.solved_streak, 1);
/// # Ok::<(), tilerush_game::PersistError>(())
/// ```
#[derive(Debug)]
pub struct ProgressTracker<S> {
    store: S,
    identity: Identity,
    state: GameState,
}

impl<S> ProgressTracker<S>
where
    S: StateStore,
{
    /// Loads the progress of `identity` from `store`.
    #[must_use]
    pub fn open(store: S, identity: Identity) -> Self {
        let state = load_game_state(&store, &identity);
        Self {
            store,
            identity,
            state,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the identity the progress belongs to.
    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Returns the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a solve. See [`GameState::record_solve`].
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn record_solve(&mut self, seconds: f64, stage: Stage) -> Result<SolveOutcome, PersistError> {
        let outcome = self.state.record_solve(seconds, stage);
        self.save()?;
        Ok(outcome)
    }

    /// Records a give-up. See [`GameState::record_give_up`].
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn record_give_up(&mut self, stage: Stage) -> Result<GiveUpOutcome, PersistError> {
        let outcome = self.state.record_give_up(stage);
        self.save()?;
        Ok(outcome)
    }

    /// Switches to an unlocked stage. See [`GameState::set_current_stage`].
    ///
    /// Nothing is written when the stage is locked.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn set_current_stage(&mut self, stage: Stage) -> Result<bool, PersistError> {
        if !self.state.set_current_stage(stage) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Starts a fresh puzzle on the current stage and saves it as in progress.
    ///
    /// Layouts already completed on the stage are not served again.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn start_puzzle(
        &mut self,
        generator: &BoardGenerator,
        now: SystemTime,
    ) -> Result<PuzzleSession, PersistError> {
        let stage = self.state.current_stage;
        let completed = self.state.completed_layouts(stage);
        let generated = generator.generate_excluding(stage.board_size(), &completed);
        log::debug!(
            "new {stage} puzzle {} after {} attempts",
            generated.board.layout_id(),
            generated.attempts
        );
        let session = PuzzleSession::for_stage(stage, generated.board, now);
        self.save_puzzle(&session)?;
        Ok(session)
    }

    /// Returns the saved puzzle in progress, if there is one that can be resumed.
    #[must_use]
    pub fn resume_puzzle(&self) -> Option<PuzzleSession> {
        let snapshot = self.state.current_puzzle.as_ref()?;
        match PuzzleSession::from_snapshot(snapshot) {
            Ok(session) => Some(session),
            Err(err) => {
                log::warn!("discarding saved puzzle: {err}");
                None
            }
        }
    }

    /// Saves `session` as the puzzle in progress.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn save_puzzle(&mut self, session: &PuzzleSession) -> Result<(), PersistError> {
        self.state.current_puzzle = Some(session.snapshot());
        self.save()
    }

    /// Records a solved puzzle: marks its layout as completed, records the solve
    /// time measured at `now` and clears the puzzle in progress.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn complete_puzzle(
        &mut self,
        session: &PuzzleSession,
        now: SystemTime,
    ) -> Result<SolveOutcome, PersistError> {
        let stage = session.stage();
        self.state.mark_completed(stage, session.start().layout_id());
        self.state.current_puzzle = None;
        self.record_solve(session.elapsed(now).as_secs_f64(), stage)
    }

    /// Records a give-up on `session` and clears the puzzle in progress.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if saving fails.
    pub fn give_up_puzzle(&mut self, session: &PuzzleSession) -> Result<GiveUpOutcome, PersistError> {
        self.state.current_puzzle = None;
        self.record_give_up(session.stage())
    }

    /// Ends the session. Guest progress is wiped from the store.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if clearing guest state fails.
    pub fn end_session(mut self) -> Result<S, PersistError> {
        if self.identity.is_guest() {
            let removed = clear_guest_state(&mut self.store)?;
            log::debug!("cleared {removed} guest state entries");
        }
        Ok(self.store)
    }

    fn save(&mut self) -> Result<(), PersistError> {
        save_game_state(&mut self.store, &self.identity, &self.state)
    }
}
