use tilerush_core::BoardError;

/// Errors returned by puzzle sessions, races and progression.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From, derive_more::IsVariant)]
pub enum GameError {
    /// The move was rejected by the board.
    #[display("{_0}")]
    #[from]
    Board(BoardError),
    /// The board is already solved; no further moves are accepted.
    #[display("puzzle is already solved")]
    AlreadySolved,
    /// The race has ended; no further moves are accepted.
    #[display("race is over")]
    RaceOver,
    /// The per-puzzle hint allowance is used up.
    #[display("no hints left (limit is {limit} per puzzle)")]
    HintLimitReached {
        /// Hints allowed per puzzle.
        limit: u32,
    },
    /// The board size is not one of the progression stages.
    #[display("{size} boards are not a progression stage")]
    UnsupportedStage {
        /// Edge length of the rejected board.
        size: u8,
    },
}

/// Errors returned when reading or writing persisted game state.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PersistError {
    /// The storage backend failed.
    #[display("storage I/O failed: {_0}")]
    Io(std::io::Error),
    /// The state could not be encoded.
    #[display("failed to encode game state: {_0}")]
    Json(serde_json::Error),
}
