//! Player-versus-bot races.

use tilerush_bot::{BotDecision, BotStep, CancelHandle};
use tilerush_core::Board;

use crate::GameError;

/// A race participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Racer {
    /// The human player.
    #[display("player")]
    Player,
    /// The bot opponent.
    #[display("bot")]
    Bot,
}

/// A race between the player and the bot on copies of the same start board.
///
/// The first racer to solve their board wins. Winning, like abandoning the race,
/// cancels the shared [`CancelHandle`], so a bot scheduler started with
/// [`Race::cancel_handle`] stops stepping. Once the race is over no move is applied
/// to either board.
///
/// # Examples
///
/// ```
/// use tilerush_bot::BotDecision;
/// use tilerush_game::{Race, Racer};
///
/// let mut race = Race::new("1,2,3,4,5,6,7,0,8".parse()?);
/// race.player_move(8)?;
/// assert_eq!(race.winner(), Some(Racer::Player));
/// assert!(race.cancel_handle().is_cancelled());
///
/// // The bot's winning move arrives too late.
/// let late = BotDecision::Move { index: 8, quality: tilerush_bot::MoveQuality::Best };
/// assert!(race.apply_bot_decision(late).is_err());
/// # Ok::<(), tilerush_game::GameError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Race {
    start: Board,
    player: Board,
    bot: Board,
    player_moves: u32,
    bot_moves: u32,
    winner: Option<Racer>,
    over: bool,
    cancel: CancelHandle,
}

impl Race {
    /// Starts a race from `start`.
    #[must_use]
    pub fn new(start: Board) -> Self {
        Self::with_cancel_handle(start, CancelHandle::new())
    }

    /// Starts a race that cancels `cancel` when it ends.
    #[must_use]
    pub fn with_cancel_handle(start: Board, cancel: CancelHandle) -> Self {
        Self {
            player: start.clone(),
            bot: start.clone(),
            start,
            player_moves: 0,
            bot_moves: 0,
            winner: None,
            over: false,
            cancel,
        }
    }

    /// Returns the start board.
    #[must_use]
    pub fn start(&self) -> &Board {
        &self.start
    }

    /// Returns the player's board.
    #[must_use]
    pub fn player_board(&self) -> &Board {
        &self.player
    }

    /// Returns the bot's board.
    #[must_use]
    pub fn bot_board(&self) -> &Board {
        &self.bot
    }

    /// Returns the number of moves the player made.
    #[must_use]
    pub fn player_moves(&self) -> u32 {
        self.player_moves
    }

    /// Returns the number of moves the bot made.
    #[must_use]
    pub fn bot_moves(&self) -> u32 {
        self.bot_moves
    }

    /// Returns the winner, once there is one.
    #[must_use]
    pub fn winner(&self) -> Option<Racer> {
        self.winner
    }

    /// Returns `true` once the race has a winner or was abandoned.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Returns the handle cancelled when the race ends.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Slides the tile at `index` on the player's board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RaceOver`] after the race ended and [`GameError::Board`]
    /// if `index` is not next to the blank.
    pub fn player_move(&mut self, index: usize) -> Result<(), GameError> {
        if self.over {
            return Err(GameError::RaceOver);
        }
        self.player = self.player.slide(index)?;
        self.player_moves += 1;
        if self.player.is_solved() {
            self.declare_winner(Racer::Player);
        }
        Ok(())
    }

    /// Applies a bot decision to the bot's board. Pauses and `Done` change nothing.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::RaceOver`] after the race ended and [`GameError::Board`]
    /// if the move is not next to the blank.
    pub fn apply_bot_decision(&mut self, decision: BotDecision) -> Result<(), GameError> {
        if self.over {
            return Err(GameError::RaceOver);
        }
        if let BotDecision::Move { index, .. } = decision {
            self.bot = self.bot.slide(index)?;
            self.bot_moves += 1;
            if self.bot.is_solved() {
                self.declare_winner(Racer::Bot);
            }
        }
        Ok(())
    }

    /// Applies the decision carried by a scheduler step.
    ///
    /// # Errors
    ///
    /// See [`Race::apply_bot_decision`].
    pub fn apply_bot_step(&mut self, step: &BotStep) -> Result<(), GameError> {
        self.apply_bot_decision(step.decision)
    }

    /// Records `racer` as the winner unless the race is already over.
    ///
    /// Returns `true` only for the call that ended the race; later calls are no-ops.
    pub fn declare_winner(&mut self, racer: Racer) -> bool {
        if self.over {
            return false;
        }
        self.winner = Some(racer);
        self.finish();
        log::debug!("race won by {racer}");
        true
    }

    /// Ends the race without a winner.
    pub fn abandon(&mut self) {
        if !self.over {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.over = true;
        self.cancel.cancel();
    }
}
