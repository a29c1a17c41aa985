use std::{collections::VecDeque, str::FromStr, time::Duration};

use rand::prelude::*;
use rand_pcg::Pcg64;
use tilerush_core::Board;
use tilerush_generator::BoardSeed;
use tilerush_solver::{OptimalSolver, compute_bot_moves, greedy_move};

use crate::{Difficulty, FALLBACK_DELAY, PlannedMove, distort_plan, sample_delay};

/// How good a bot move is relative to the optimal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum MoveQuality {
    /// The optimal (or, without an optimal solver, the heuristic) move.
    #[display("best")]
    Best,
    /// A deliberate detour.
    #[display("mistake")]
    Mistake,
}

/// What the bot does on one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum BotDecision {
    /// Skip this step without moving.
    Pause,
    /// Slide the tile at `index` into the blank.
    Move {
        /// Board index the blank swaps with.
        index: usize,
        /// Whether the move follows the optimal path.
        quality: MoveQuality,
    },
    /// The bot has nothing left to do.
    Done,
}

/// Strategy used to pick bot moves. A race uses one mode throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum BotMode {
    /// Follow a humanized plan computed once from the start board.
    #[default]
    #[display("planned")]
    Planned,
    /// Decide each step from the current board.
    #[display("reactive")]
    Reactive,
}

/// Error returned when a bot mode name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown bot mode `{name}` (expected planned or reactive)")]
pub struct ParseBotModeError {
    name: String,
}

impl FromStr for BotMode {
    type Err = ParseBotModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("planned") {
            Ok(Self::Planned)
        } else if name.eq_ignore_ascii_case("reactive") {
            Ok(Self::Reactive)
        } else {
            Err(ParseBotModeError {
                name: name.to_owned(),
            })
        }
    }
}

/// Bot configuration.
///
/// A `None` difficulty stands for an unrecognized tier: the bot plays the optimal
/// line without pauses or mistakes, at [`FALLBACK_DELAY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotConfig {
    difficulty: Option<Difficulty>,
    mode: BotMode,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl BotConfig {
    /// Creates a planned-mode configuration for `difficulty`.
    #[must_use]
    pub const fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty: Some(difficulty),
            mode: BotMode::Planned,
        }
    }

    /// Creates a configuration from a tier name, falling back to an unrecognized tier.
    #[must_use]
    pub fn from_tier_name(name: &str) -> Self {
        Self {
            difficulty: name.parse().ok(),
            mode: BotMode::Planned,
        }
    }

    /// Sets the decision mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: BotMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the difficulty tier, if recognized.
    #[must_use]
    pub const fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Returns the decision mode.
    #[must_use]
    pub const fn mode(&self) -> BotMode {
        self.mode
    }
}

/// Per-race bot state: configuration, random source and the remaining plan.
#[derive(Debug, Clone)]
pub struct BotBrain {
    config: BotConfig,
    rng: Pcg64,
    plan: VecDeque<PlannedMove>,
    previous_blank: Option<usize>,
}

impl BotBrain {
    /// Creates the bot for a race starting from `start`.
    ///
    /// In [`BotMode::Planned`] the optimal path is computed and distorted here; boards
    /// the optimal solver does not cover get an empty plan.
    #[must_use]
    pub fn new(config: BotConfig, start: &Board, mut rng: Pcg64) -> Self {
        let plan = match config.mode {
            BotMode::Planned => {
                let optimal = compute_bot_moves(start);
                match config.difficulty {
                    Some(tier) => distort_plan(start, &optimal, tier, &mut rng).into(),
                    None => optimal
                        .into_iter()
                        .map(|index| PlannedMove {
                            index,
                            quality: MoveQuality::Best,
                        })
                        .collect(),
                }
            }
            BotMode::Reactive => VecDeque::new(),
        };
        log::debug!(
            "bot ready: mode={} difficulty={:?} planned={}",
            config.mode,
            config.difficulty,
            plan.len(),
        );
        Self {
            config,
            rng,
            plan,
            previous_blank: None,
        }
    }

    /// Creates the bot with a random source derived from `seed`.
    #[must_use]
    pub fn with_seed(config: BotConfig, start: &Board, seed: BoardSeed) -> Self {
        Self::new(config, start, seed.rng())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Returns the number of planned entries not yet consumed.
    #[must_use]
    pub fn remaining_plan(&self) -> usize {
        self.plan.len()
    }

    /// Chooses what to do on `board`.
    pub fn decide(&mut self, board: &Board) -> BotDecision {
        if board.is_solved() {
            return BotDecision::Done;
        }
        let decision = match self.config.mode {
            BotMode::Planned => self.decide_planned(board),
            BotMode::Reactive => self.decide_reactive(board),
        };
        if let BotDecision::Move { .. } = decision {
            self.previous_blank = Some(board.blank_index());
        }
        decision
    }

    /// Returns the delay before the next step.
    pub fn next_delay(&mut self) -> Duration {
        match (self.config.mode, self.config.difficulty) {
            (BotMode::Planned, difficulty) => sample_delay(difficulty, &mut self.rng),
            (BotMode::Reactive, Some(tier)) => tier.base_delay(),
            (BotMode::Reactive, None) => FALLBACK_DELAY,
        }
    }

    fn decide_planned(&mut self, board: &Board) -> BotDecision {
        let Some(planned) = self.plan.pop_front() else {
            return BotDecision::Done;
        };
        if board.can_slide(planned.index) {
            BotDecision::Move {
                index: planned.index,
                quality: planned.quality,
            }
        } else {
            BotDecision::Pause
        }
    }

    fn decide_reactive(&mut self, board: &Board) -> BotDecision {
        let best = OptimalSolver::new()
            .next_move(board)
            .or_else(|| greedy_move(board, self.previous_blank));
        let Some(best) = best else {
            return BotDecision::Done;
        };

        let (pause, mistake) = self
            .config
            .difficulty
            .map_or((0.0, 0.0), Difficulty::decision_odds);
        let roll: f64 = self.rng.random();

        if roll < pause {
            return BotDecision::Pause;
        }
        if roll < pause + mistake {
            let alternatives: Vec<usize> = board
                .blank_neighbors()
                .into_iter()
                .filter(|&index| index != best && Some(index) != self.previous_blank)
                .collect();
            if let Some(&index) = alternatives.choose(&mut self.rng) {
                return BotDecision::Move {
                    index,
                    quality: MoveQuality::Mistake,
                };
            }
        }
        BotDecision::Move {
            index: best,
            quality: MoveQuality::Best,
        }
    }
}

#[cfg(test)]
mod tests {
    use tilerush_core::BoardSize;
    use tilerush_generator::scramble_walk;

    use super::*;

    fn rng(byte: u8) -> Pcg64 {
        Pcg64::from_seed([byte; 32])
    }

    fn run(brain: &mut BotBrain, start: &Board, max_steps: usize) -> (Board, Vec<BotDecision>) {
        let mut board = start.clone();
        let mut decisions = Vec::new();
        for _ in 0..max_steps {
            let decision = brain.decide(&board);
            decisions.push(decision);
            match decision {
                BotDecision::Move { index, .. } => board = board.slide(index).unwrap(),
                BotDecision::Pause => {}
                BotDecision::Done => break,
            }
        }
        (board, decisions)
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Reactive".parse::<BotMode>().unwrap(), BotMode::Reactive);
        assert_eq!("planned".parse::<BotMode>().unwrap(), BotMode::Planned);
        assert!("greedy".parse::<BotMode>().is_err());
    }

    #[test]
    fn test_unknown_tier_name_plays_optimally_at_fallback_speed() {
        let start: Board = "1,0,3,4,2,5,7,8,6".parse().unwrap();
        let config = BotConfig::from_tier_name("nightmare");
        assert_eq!(config.difficulty(), None);
        let mut brain = BotBrain::new(config, &start, rng(1));
        assert_eq!(brain.next_delay(), FALLBACK_DELAY);
        let (end, decisions) = run(&mut brain, &start, 10);
        assert!(end.is_solved());
        assert_eq!(decisions.len(), 4);
        assert!(decisions.last().unwrap().is_done());
    }

    #[test]
    fn test_planned_bot_solves_every_tier() {
        let start = scramble_walk(BoardSize::THREE, 30, BoardSeed::from([4; 32]));
        for tier in Difficulty::ALL {
            let mut brain = BotBrain::new(BotConfig::new(tier), &start, rng(2));
            let (end, decisions) = run(&mut brain, &start, 500);
            assert!(end.is_solved(), "{tier}");
            assert!(decisions.last().unwrap().is_done());
        }
    }

    #[test]
    fn test_reactive_bot_solves() {
        // Easy mistakes as often as it plays best, so it is left out here.
        let start = scramble_walk(BoardSize::THREE, 10, BoardSeed::from([5; 32]));
        for tier in [Difficulty::Adaptive, Difficulty::Medium, Difficulty::Hard] {
            let config = BotConfig::new(tier).with_mode(BotMode::Reactive);
            let mut brain = BotBrain::new(config, &start, rng(3));
            assert_eq!(brain.next_delay(), tier.base_delay());
            let (end, _) = run(&mut brain, &start, 1_000);
            assert!(end.is_solved(), "{tier}");
        }
    }

    #[test]
    fn test_reactive_mistakes_avoid_best_and_undo() {
        let start: Board = "4,1,3,7,2,6,0,5,8".parse().unwrap();
        let config = BotConfig::new(Difficulty::Easy).with_mode(BotMode::Reactive);
        let mut brain = BotBrain::new(config, &start, rng(6));
        let mut board = start;
        let mut previous_blank = None;
        for _ in 0..200 {
            if board.is_solved() {
                break;
            }
            let best = OptimalSolver::new().next_move(&board).unwrap();
            match brain.decide(&board) {
                BotDecision::Move { index, quality } => {
                    assert!(board.can_slide(index));
                    if quality.is_mistake() {
                        assert_ne!(index, best);
                        assert_ne!(Some(index), previous_blank);
                    } else {
                        assert_eq!(index, best);
                    }
                    previous_blank = Some(board.blank_index());
                    board = board.slide(index).unwrap();
                }
                BotDecision::Pause => {}
                BotDecision::Done => unreachable!("board is not solved"),
            }
        }
    }

    #[test]
    fn test_reactive_bot_uses_heuristic_on_large_boards() {
        let start: Board = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,0,15".parse().unwrap();
        let config = BotConfig::new(Difficulty::Hard).with_mode(BotMode::Reactive);
        let mut brain = BotBrain::new(config, &start, rng(8));
        let decision = (0..20)
            .map(|_| brain.decide(&start))
            .find(|decision| !decision.is_pause());
        assert!(matches!(decision, Some(BotDecision::Move { .. })));
    }

    #[test]
    fn test_planned_bot_has_no_plan_on_large_boards() {
        let start: Board = "1,2,3,4,5,6,7,8,9,10,11,12,13,14,0,15".parse().unwrap();
        let mut brain = BotBrain::new(BotConfig::new(Difficulty::Hard), &start, rng(8));
        assert_eq!(brain.remaining_plan(), 0);
        assert_eq!(brain.decide(&start), BotDecision::Done);
    }

    #[test]
    fn test_solved_board_is_done() {
        let goal = Board::goal(BoardSize::THREE);
        for mode in [BotMode::Planned, BotMode::Reactive] {
            let config = BotConfig::new(Difficulty::Easy).with_mode(mode);
            let mut brain = BotBrain::new(config, &goal, rng(9));
            assert_eq!(brain.decide(&goal), BotDecision::Done);
        }
    }
}
