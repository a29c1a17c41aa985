use std::{cell::Cell, rc::Rc, time::Duration};

use tilerush_core::Board;

use crate::{BotBrain, BotDecision};

/// Result of one bot step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotStep {
    /// The decision taken.
    pub decision: BotDecision,
    /// The bot board after applying the decision.
    pub board: Board,
    /// Delay before the next step.
    pub delay: Duration,
    /// `true` if no further step should be scheduled.
    pub terminal: bool,
}

/// Runs one bot step on `board`.
///
/// Depends only on its inputs and the brain's random source: the board is never
/// mutated, and the returned [`BotStep::board`] is the successor value.
pub fn bot_step(board: &Board, brain: &mut BotBrain) -> BotStep {
    let decision = brain.decide(board);
    let (decision, next) = match decision {
        BotDecision::Move { index, .. } => match board.slide(index) {
            Ok(next) => (decision, next),
            Err(err) => {
                log::debug!("bot move rejected ({err}); pausing instead");
                (BotDecision::Pause, board.clone())
            }
        },
        BotDecision::Pause | BotDecision::Done => (decision, board.clone()),
    };
    let terminal = decision.is_done() || next.is_solved();
    let delay = if terminal {
        Duration::ZERO
    } else {
        brain.next_delay()
    };
    log::debug!("bot step: {decision:?} terminal={terminal} next in {delay:?}");
    BotStep {
        decision,
        board: next,
        delay,
        terminal,
    }
}

/// Handle that stops a [`BotScheduler`].
///
/// Clones share the same flag, so any owner (the race, the view that started it) can
/// stop the bot.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Rc<Cell<bool>>,
}

impl CancelHandle {
    /// Creates a handle that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops every scheduler sharing this handle. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Timer-driven bot stepping, polled from the caller's loop.
///
/// The scheduler keeps a single deadline. [`poll`](Self::poll) does nothing until the
/// deadline has passed; then it runs one [`bot_step`] on the board it is given and
/// schedules the next deadline after the sampled delay. Once a step is terminal or
/// the handle is cancelled, the scheduler never steps again.
///
/// Time is whatever monotonic clock the caller uses, expressed as a [`Duration`] since
/// an arbitrary origin; tests drive it with a virtual clock.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg64;
/// use tilerush_bot::{BotBrain, BotConfig, BotScheduler, Difficulty};
/// use tilerush_core::Board;
///
/// let mut board: Board = "1,2,3,4,5,6,7,0,8".parse()?;
/// let brain = BotBrain::new(BotConfig::new(Difficulty::Hard), &board, Pcg64::from_seed([0; 32]));
/// let mut scheduler = BotScheduler::start(brain, Duration::ZERO);
///
/// // Nothing happens before the first deadline.
/// assert!(scheduler.poll(Duration::ZERO, &board).is_none());
///
/// let step = scheduler.poll(Duration::from_secs(1), &board).unwrap();
/// board = step.board;
/// assert!(board.is_solved());
/// assert!(!scheduler.is_running());
/// # Ok::<(), tilerush_core::BoardError>(())
/// ```
#[derive(Debug)]
pub struct BotScheduler {
    brain: BotBrain,
    deadline: Option<Duration>,
    cancel: CancelHandle,
    steps: usize,
}

impl BotScheduler {
    /// Starts stepping at `now`; the first step fires after one sampled delay.
    #[must_use]
    pub fn start(brain: BotBrain, now: Duration) -> Self {
        Self::start_with_handle(brain, now, CancelHandle::new())
    }

    /// Starts stepping with an existing cancellation handle.
    #[must_use]
    pub fn start_with_handle(mut brain: BotBrain, now: Duration, cancel: CancelHandle) -> Self {
        let deadline = (!cancel.is_cancelled()).then(|| now + brain.next_delay());
        Self {
            brain,
            deadline,
            cancel,
            steps: 0,
        }
    }

    /// Returns a handle that stops this scheduler.
    #[must_use]
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Stops the scheduler.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.deadline = None;
    }

    /// Returns `true` while further steps are scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some() && !self.cancel.is_cancelled()
    }

    /// Returns when the next step fires, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadline.filter(|_| !self.cancel.is_cancelled())
    }

    /// Returns the number of steps taken so far.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the bot state.
    #[must_use]
    pub fn brain(&self) -> &BotBrain {
        &self.brain
    }

    /// Runs at most one step if its deadline has passed.
    ///
    /// `board` is the current bot board; the caller applies the returned step.
    pub fn poll(&mut self, now: Duration, board: &Board) -> Option<BotStep> {
        if self.cancel.is_cancelled() {
            self.deadline = None;
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        let step = bot_step(board, &mut self.brain);
        self.steps += 1;
        self.deadline = (!step.terminal).then(|| deadline + step.delay);
        Some(step)
    }
}
