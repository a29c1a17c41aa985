//! A single puzzle being played.

use std::{
    num::NonZero,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use tilerush_core::Board;

use crate::{GameError, PuzzleSnapshot, Stage, next_hint, undo_redo_stack::UndoRedoStack};

/// Hints allowed per puzzle.
pub const HINT_LIMIT: u32 = 3;

/// How long a hint stays highlighted.
pub const HINT_HIGHLIGHT_DURATION: Duration = Duration::from_millis(700);

const HISTORY_CAPACITY: NonZero<usize> = NonZero::new(1000).unwrap();

/// A highlighted hint tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HintHighlight {
    /// Board index of the hinted tile.
    pub index: usize,
    /// When the highlight disappears.
    pub expires_at: SystemTime,
}

impl HintHighlight {
    /// Returns `true` while the highlight should be shown.
    #[must_use]
    pub fn is_active(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }
}

/// A puzzle in play: the start board, the move history and hint usage.
///
/// # Examples
///
/// ```
/// use std::time::SystemTime;
///
/// use tilerush_game::PuzzleSession;
///
/// let now = SystemTime::now();
/// let mut session = PuzzleSession::new("1,2,3,4,5,6,0,7,8".parse()?, now)?;
/// assert!(session.try_move(0).is_err()); // not next to the blank
/// assert!(!session.try_move(7)?);
/// assert!(session.undo());
/// assert!(session.redo());
/// assert!(session.try_move(8)?); // solved
/// assert_eq!(session.moves(), 2);
/// # Ok::<(), tilerush_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PuzzleSession {
    stage: Stage,
    start: Board,
    history: UndoRedoStack<Board>,
    moves: u32,
    started_at: SystemTime,
    hints_used: u32,
    last_hint: Option<usize>,
    highlight: Option<HintHighlight>,
}

impl PuzzleSession {
    /// Starts a puzzle on `board` at time `now`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnsupportedStage`] if the board size is not a stage.
    pub fn new(board: Board, now: SystemTime) -> Result<Self, GameError> {
        let stage = Stage::try_from(board.size())?;
        Ok(Self::for_stage(stage, board, now))
    }

    pub(crate) fn for_stage(stage: Stage, board: Board, now: SystemTime) -> Self {
        debug_assert_eq!(stage.board_size(), board.size());
        Self {
            stage,
            history: UndoRedoStack::with_root(HISTORY_CAPACITY, board.clone()),
            start: board,
            moves: 0,
            started_at: now,
            hints_used: 0,
            last_hint: None,
            highlight: None,
        }
    }

    /// Resumes a saved puzzle.
    ///
    /// The undo history starts fresh from the saved board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::UnsupportedStage`] if the saved boards do not match the
    /// saved stage.
    pub fn from_snapshot(snapshot: &PuzzleSnapshot) -> Result<Self, GameError> {
        let size = snapshot.tiles.size();
        if size != snapshot.stage.board_size() || snapshot.start_tiles.size() != size {
            return Err(GameError::UnsupportedStage { size: size.get() });
        }
        Ok(Self {
            stage: snapshot.stage,
            start: snapshot.start_tiles.clone(),
            history: UndoRedoStack::with_root(HISTORY_CAPACITY, snapshot.tiles.clone()),
            moves: snapshot.moves,
            started_at: UNIX_EPOCH + Duration::from_millis(snapshot.started_at),
            hints_used: snapshot.hints_used.min(HINT_LIMIT),
            last_hint: None,
            highlight: None,
        })
    }

    /// Captures the puzzle for saving.
    #[must_use]
    pub fn snapshot(&self) -> PuzzleSnapshot {
        let started_at = self
            .started_at
            .duration_since(UNIX_EPOCH)
            .map_or(0, |since| u64::try_from(since.as_millis()).unwrap_or(u64::MAX));
        PuzzleSnapshot {
            stage: self.stage,
            tiles: self.board().clone(),
            start_tiles: self.start.clone(),
            moves: self.moves,
            started_at,
            hints_used: self.hints_used,
        }
    }

    /// Returns the stage.
    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the start board.
    #[must_use]
    pub fn start(&self) -> &Board {
        &self.start
    }

    /// Returns the current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        self.history.current().unwrap_or(&self.start)
    }

    /// Returns `true` once the current board is solved.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board().is_solved()
    }

    /// Returns the number of moves made (undo and redo do not count).
    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Returns when the puzzle started.
    #[must_use]
    pub fn started_at(&self) -> SystemTime {
        self.started_at
    }

    /// Returns the time spent on the puzzle at `now`.
    #[must_use]
    pub fn elapsed(&self, now: SystemTime) -> Duration {
        now.duration_since(self.started_at).unwrap_or_default()
    }

    /// Returns the number of hints used.
    #[must_use]
    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    /// Returns the number of hints still available.
    #[must_use]
    pub fn hints_left(&self) -> u32 {
        HINT_LIMIT.saturating_sub(self.hints_used)
    }

    /// Returns the hint highlight if it is still showing at `now`.
    #[must_use]
    pub fn highlight(&self, now: SystemTime) -> Option<HintHighlight> {
        self.highlight.filter(|highlight| highlight.is_active(now))
    }

    /// Slides the tile at `index` into the blank.
    ///
    /// Returns `true` if the move solved the puzzle. Clears any hint highlight.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::AlreadySolved`] after the puzzle is solved, and
    /// [`GameError::Board`] if `index` is not next to the blank.
    pub fn try_move(&mut self, index: usize) -> Result<bool, GameError> {
        if self.is_solved() {
            return Err(GameError::AlreadySolved);
        }
        let next = self.board().slide(index)?;
        let solved = next.is_solved();
        self.history.push(next);
        self.moves += 1;
        self.highlight = None;
        Ok(solved)
    }

    /// Steps back one move. Returns `false` if there is nothing to undo or the
    /// puzzle is solved.
    pub fn undo(&mut self) -> bool {
        if self.is_solved() {
            return false;
        }
        self.highlight = None;
        self.history.undo()
    }

    /// Re-applies an undone move. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.highlight = None;
        self.history.redo()
    }

    /// Puts the start board back and resets the move and hint counters.
    ///
    /// The clock keeps running from the original start time.
    pub fn restart(&mut self) {
        self.history.reset(self.start.clone());
        self.moves = 0;
        self.hints_used = 0;
        self.last_hint = None;
        self.highlight = None;
    }

    /// Uses one hint and highlights the suggested tile until
    /// [`HINT_HIGHLIGHT_DURATION`] has passed or the next move.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::AlreadySolved`] after the puzzle is solved and
    /// [`GameError::HintLimitReached`] once [`HINT_LIMIT`] hints are used.
    pub fn request_hint(&mut self, now: SystemTime) -> Result<Option<HintHighlight>, GameError> {
        if self.is_solved() {
            return Err(GameError::AlreadySolved);
        }
        if self.hints_used >= HINT_LIMIT {
            return Err(GameError::HintLimitReached { limit: HINT_LIMIT });
        }
        let Some(index) = next_hint(self.board(), self.last_hint) else {
            return Ok(None);
        };
        self.hints_used += 1;
        self.last_hint = Some(index);
        let highlight = HintHighlight {
            index,
            expires_at: now + HINT_HIGHLIGHT_DURATION,
        };
        self.highlight = Some(highlight);
        Ok(Some(highlight))
    }
}
