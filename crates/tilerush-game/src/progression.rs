//! Stage progression: promotion, demotion and per-stage statistics.
//!
//! A player starts on the 3×3 stage. Five consecutive solves on a stage promote to the
//! next one (unlocking it if needed); five consecutive give-ups demote to the previous
//! one. Any unlocked stage can also be picked by hand, which leaves the streaks alone.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
};

use serde::{Deserialize, Deserializer, Serialize};
use tilerush_core::{Board, BoardSize, LayoutId};

use crate::GameError;

/// Consecutive solves needed to move up a stage.
pub const SOLVES_TO_UNLOCK: u32 = 5;

/// Consecutive give-ups that move down a stage.
pub const GIVEUPS_TO_DEMOTE: u32 = 5;

/// Number of puzzles offered per stage.
pub const PUZZLES_PER_STAGE: usize = 50;

/// A progression stage, identified by its board edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Stage(u8);

impl Stage {
    /// The 3×3 stage every player starts on.
    pub const THREE: Self = Self(3);
    /// The 4×4 stage.
    pub const FOUR: Self = Self(4);
    /// The 5×5 stage.
    pub const FIVE: Self = Self(5);
    /// All stages, in order.
    pub const ALL: [Self; 3] = [Self::THREE, Self::FOUR, Self::FIVE];

    /// Returns the stage for edge length `size`, if it is one.
    #[must_use]
    pub fn new(size: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|stage| stage.0 == size)
    }

    /// Returns the edge length.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Returns the board size played on this stage.
    #[must_use]
    pub const fn board_size(self) -> BoardSize {
        match self.0 {
            4 => BoardSize::FOUR,
            5 => BoardSize::FIVE,
            _ => BoardSize::THREE,
        }
    }

    /// Returns the stage after this one.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Returns the stage before this one.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        Self::new(self.0 - 1)
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::THREE
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

impl TryFrom<u8> for Stage {
    type Error = GameError;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        Self::new(size).ok_or(GameError::UnsupportedStage { size })
    }
}

impl TryFrom<BoardSize> for Stage {
    type Error = GameError;

    fn try_from(size: BoardSize) -> Result<Self, Self::Error> {
        Self::try_from(size.get())
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.0
    }
}

/// Solve statistics for one stage. Times are in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StageStats {
    /// Number of solved puzzles.
    #[serde(deserialize_with = "null_as_default")]
    pub completed: u32,
    /// Sum of all solve times.
    #[serde(deserialize_with = "null_as_default")]
    pub total_time: f64,
    /// Fastest solve time.
    pub best_time: Option<f64>,
    /// Layouts already solved on this stage, so they are not served again.
    #[serde(deserialize_with = "null_as_default")]
    pub completed_layouts: Vec<LayoutId>,
}

impl StageStats {
    /// Returns the average solve time, or `None` before the first solve.
    #[must_use]
    pub fn average_time(&self) -> Option<f64> {
        (self.completed > 0).then(|| self.total_time / f64::from(self.completed))
    }
}

/// A puzzle in progress, saved so it can be resumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleSnapshot {
    /// Stage the puzzle belongs to.
    pub stage: Stage,
    /// Current board.
    pub tiles: Board,
    /// Board the puzzle started from.
    pub start_tiles: Board,
    /// Moves made so far.
    pub moves: u32,
    /// Start time in Unix milliseconds.
    pub started_at: u64,
    /// Hints used so far.
    #[serde(default)]
    pub hints_used: u32,
}

/// Result of [`GameState::record_solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveOutcome {
    /// The stage newly unlocked by this solve, if any.
    pub unlocked_stage: Option<Stage>,
    /// `true` if the player moved up a stage.
    pub promoted: bool,
}

/// Result of [`GameState::record_give_up`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GiveUpOutcome {
    /// `true` if the player moved down a stage.
    pub demoted: bool,
    /// The stage to play next.
    pub new_stage: Stage,
}

/// A player's progression across stages.
///
/// Serialized as camelCase JSON. Loading tolerates older and newer shapes: missing
/// fields take their defaults, unknown fields are ignored, and statistics for board
/// sizes that are not stages are dropped.
///
/// # Examples
///
/// ```
/// use tilerush_game::{GameState, Stage};
///
/// let mut state = GameState::default();
/// for _ in 0..4 {
///     assert!(!state.record_solve(30.0, Stage::THREE).promoted);
/// }
/// let outcome = state.record_solve(25.0, Stage::THREE);
/// assert!(outcome.promoted);
/// assert_eq!(outcome.unlocked_stage, Some(Stage::FOUR));
/// assert_eq!(state.current_stage, Stage::FOUR);
/// assert_eq!(state.average_time(Stage::THREE), Some(29.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameState {
    /// Stage being played.
    #[serde(deserialize_with = "null_as_default")]
    pub current_stage: Stage,
    /// Highest stage unlocked so far.
    #[serde(deserialize_with = "null_as_default")]
    pub max_unlocked_stage: Stage,
    /// Consecutive solves since the last give-up or stage change.
    #[serde(deserialize_with = "null_as_default")]
    pub solved_streak: u32,
    /// Consecutive give-ups since the last solve or stage change.
    #[serde(deserialize_with = "null_as_default")]
    pub give_up_streak: u32,
    /// Statistics for every stage.
    #[serde(deserialize_with = "deserialize_per_stage")]
    pub per_stage: BTreeMap<Stage, StageStats>,
    /// The puzzle in progress, if any.
    pub current_puzzle: Option<PuzzleSnapshot>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            current_stage: Stage::THREE,
            max_unlocked_stage: Stage::THREE,
            solved_streak: 0,
            give_up_streak: 0,
            per_stage: empty_per_stage(),
            current_puzzle: None,
        }
    }
}

fn empty_per_stage() -> BTreeMap<Stage, StageStats> {
    Stage::ALL
        .into_iter()
        .map(|stage| (stage, StageStats::default()))
        .collect()
}

/// Reads a saved field, treating `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_per_stage<'de, D>(deserializer: D) -> Result<BTreeMap<Stage, StageStats>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: BTreeMap<u8, Option<StageStats>> = null_as_default(deserializer)?;
    let mut per_stage = empty_per_stage();
    for (size, stats) in raw {
        match Stage::new(size) {
            Some(stage) => {
                per_stage.insert(stage, stats.unwrap_or_default());
            }
            None => log::debug!("dropping stats for unsupported stage {size}"),
        }
    }
    Ok(per_stage)
}

impl GameState {
    /// Returns the statistics for `stage`.
    #[must_use]
    pub fn stats(&self, stage: Stage) -> Option<&StageStats> {
        self.per_stage.get(&stage)
    }

    /// Returns `true` if `stage` can be played.
    #[must_use]
    pub fn is_unlocked(&self, stage: Stage) -> bool {
        stage <= self.max_unlocked_stage
    }

    /// Records a solved puzzle on `stage` taking `seconds`.
    ///
    /// Resets the give-up streak and bumps the solve streak. When the streak reaches
    /// [`SOLVES_TO_UNLOCK`] and a higher stage exists, the player is promoted to it
    /// (unlocking it if needed) and the streak resets; otherwise play stays on
    /// `stage`.
    pub fn record_solve(&mut self, seconds: f64, stage: Stage) -> SolveOutcome {
        let seconds = seconds.max(0.0);
        self.give_up_streak = 0;
        self.solved_streak += 1;

        let stats = self.per_stage.entry(stage).or_default();
        stats.completed += 1;
        stats.total_time += seconds;
        if stats.best_time.is_none_or(|best| seconds < best) {
            stats.best_time = Some(seconds);
        }

        let mut outcome = SolveOutcome {
            unlocked_stage: None,
            promoted: false,
        };
        match stage.next() {
            Some(next) if self.solved_streak >= SOLVES_TO_UNLOCK => {
                if next > self.max_unlocked_stage {
                    self.max_unlocked_stage = next;
                    outcome.unlocked_stage = Some(next);
                }
                self.current_stage = next;
                self.solved_streak = 0;
                outcome.promoted = true;
                log::debug!("promoted from {stage} to {next}");
            }
            _ => self.current_stage = stage,
        }
        outcome
    }

    /// Records a give-up on `stage`.
    ///
    /// Resets the solve streak and bumps the give-up streak. When the streak reaches
    /// [`GIVEUPS_TO_DEMOTE`] and a lower stage exists, the player is demoted to it
    /// and the streak resets; otherwise play stays on `stage`.
    pub fn record_give_up(&mut self, stage: Stage) -> GiveUpOutcome {
        self.solved_streak = 0;
        self.give_up_streak += 1;

        match stage.previous() {
            Some(lower) if self.give_up_streak >= GIVEUPS_TO_DEMOTE => {
                self.current_stage = lower;
                self.give_up_streak = 0;
                log::debug!("demoted from {stage} to {lower}");
                GiveUpOutcome {
                    demoted: true,
                    new_stage: lower,
                }
            }
            _ => {
                self.current_stage = stage;
                GiveUpOutcome {
                    demoted: false,
                    new_stage: stage,
                }
            }
        }
    }

    /// Switches to `stage` if it is unlocked. Streaks are left alone.
    ///
    /// Returns `false` (and changes nothing) for a locked stage.
    pub fn set_current_stage(&mut self, stage: Stage) -> bool {
        if !self.is_unlocked(stage) {
            return false;
        }
        self.current_stage = stage;
        true
    }

    /// Returns the average solve time on `stage`, or `None` before the first solve.
    #[must_use]
    pub fn average_time(&self, stage: Stage) -> Option<f64> {
        self.stats(stage).and_then(StageStats::average_time)
    }

    /// Remembers `layout` as completed on `stage`.
    pub fn mark_completed(&mut self, stage: Stage, layout: LayoutId) {
        let stats = self.per_stage.entry(stage).or_default();
        if !stats.completed_layouts.contains(&layout) {
            stats.completed_layouts.push(layout);
        }
    }

    /// Returns the layouts already completed on `stage`.
    #[must_use]
    pub fn completed_layouts(&self, stage: Stage) -> HashSet<LayoutId> {
        self.stats(stage)
            .map(|stats| stats.completed_layouts.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::default();
        assert_eq!(state.current_stage, Stage::THREE);
        assert_eq!(state.max_unlocked_stage, Stage::THREE);
        assert_eq!(state.solved_streak, 0);
        assert_eq!(state.give_up_streak, 0);
        assert_eq!(state.per_stage.len(), 3);
        assert!(state.per_stage.values().all(|stats| *stats == StageStats::default()));
        assert!(state.current_puzzle.is_none());
    }

    #[test]
    fn test_five_solves_promote() {
        let mut state = GameState::default();
        for i in 1..SOLVES_TO_UNLOCK {
            let outcome = state.record_solve(10.0, Stage::THREE);
            assert!(!outcome.promoted);
            assert_eq!(state.solved_streak, i);
            assert_eq!(state.current_stage, Stage::THREE);
        }
        let outcome = state.record_solve(10.0, Stage::THREE);
        assert_eq!(
            outcome,
            SolveOutcome {
                unlocked_stage: Some(Stage::FOUR),
                promoted: true,
            }
        );
        assert_eq!(state.current_stage, Stage::FOUR);
        assert_eq!(state.max_unlocked_stage, Stage::FOUR);
        assert_eq!(state.solved_streak, 0);
    }

    #[test]
    fn test_promotion_to_unlocked_stage_reports_no_unlock() {
        let mut state = GameState {
            max_unlocked_stage: Stage::FIVE,
            ..GameState::default()
        };
        let outcome = (0..SOLVES_TO_UNLOCK)
            .map(|_| state.record_solve(10.0, Stage::THREE))
            .last()
            .unwrap();
        assert!(outcome.promoted);
        assert_eq!(outcome.unlocked_stage, None);
        assert_eq!(state.current_stage, Stage::FOUR);
    }

    #[test]
    fn test_top_stage_never_promotes() {
        let mut state = GameState {
            current_stage: Stage::FIVE,
            max_unlocked_stage: Stage::FIVE,
            ..GameState::default()
        };
        for _ in 0..10 {
            assert!(!state.record_solve(10.0, Stage::FIVE).promoted);
        }
        assert_eq!(state.current_stage, Stage::FIVE);
        assert_eq!(state.solved_streak, 10);
    }

    #[test]
    fn test_give_up_after_four_solves_resets_streak() {
        let mut state = GameState::default();
        for _ in 0..4 {
            state.record_solve(10.0, Stage::THREE);
        }
        let outcome = state.record_give_up(Stage::THREE);
        assert!(!outcome.demoted);
        assert_eq!(outcome.new_stage, Stage::THREE);
        assert_eq!(state.solved_streak, 0);
        assert_eq!(state.give_up_streak, 1);
        assert!(!state.record_solve(10.0, Stage::THREE).promoted);
    }

    #[test]
    fn test_five_give_ups_demote() {
        let mut state = GameState {
            current_stage: Stage::FOUR,
            max_unlocked_stage: Stage::FOUR,
            ..GameState::default()
        };
        for i in 1..GIVEUPS_TO_DEMOTE {
            let outcome = state.record_give_up(Stage::FOUR);
            assert!(!outcome.demoted);
            assert_eq!(state.give_up_streak, i);
        }
        let outcome = state.record_give_up(Stage::FOUR);
        assert_eq!(
            outcome,
            GiveUpOutcome {
                demoted: true,
                new_stage: Stage::THREE,
            }
        );
        assert_eq!(state.current_stage, Stage::THREE);
        assert_eq!(state.max_unlocked_stage, Stage::FOUR);
        assert_eq!(state.give_up_streak, 0);
    }

    #[test]
    fn test_bottom_stage_never_demotes() {
        let mut state = GameState::default();
        for _ in 0..10 {
            assert!(!state.record_give_up(Stage::THREE).demoted);
        }
        assert_eq!(state.current_stage, Stage::THREE);
    }

    #[test]
    fn test_solve_resets_give_up_streak() {
        let mut state = GameState::default();
        state.record_give_up(Stage::THREE);
        state.record_give_up(Stage::THREE);
        state.record_solve(12.0, Stage::THREE);
        assert_eq!(state.give_up_streak, 0);
        assert_eq!(state.solved_streak, 1);
    }

    #[test]
    fn test_stage_stats_accumulate() {
        let mut state = GameState::default();
        assert_eq!(state.average_time(Stage::THREE), None);
        state.record_solve(40.0, Stage::THREE);
        state.record_solve(20.0, Stage::THREE);
        state.record_solve(30.0, Stage::THREE);
        let stats = state.stats(Stage::THREE).unwrap();
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.best_time, Some(20.0));
        assert_eq!(state.average_time(Stage::THREE), Some(30.0));
        assert_eq!(state.average_time(Stage::FOUR), None);
    }

    #[test]
    fn test_manual_stage_selection() {
        let mut state = GameState {
            max_unlocked_stage: Stage::FOUR,
            solved_streak: 3,
            give_up_streak: 0,
            ..GameState::default()
        };
        assert!(!state.set_current_stage(Stage::FIVE));
        assert_eq!(state.current_stage, Stage::THREE);
        assert!(state.set_current_stage(Stage::FOUR));
        assert_eq!(state.current_stage, Stage::FOUR);
        assert_eq!(state.solved_streak, 3);
    }

    #[test]
    fn test_completed_layouts_are_deduplicated() {
        let mut state = GameState::default();
        let layout = LayoutId::from(&Board::goal(BoardSize::THREE));
        state.mark_completed(Stage::THREE, layout.clone());
        state.mark_completed(Stage::THREE, layout.clone());
        assert_eq!(state.stats(Stage::THREE).unwrap().completed_layouts.len(), 1);
        assert!(state.completed_layouts(Stage::THREE).contains(&layout));
        assert!(state.completed_layouts(Stage::FOUR).is_empty());
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let raw = r#"{
            "currentStage": 4,
            "maxUnlockedStage": 5,
            "solvedStreak": null,
            "giveUpStreak": 2,
            "perStage": {
                "3": {"completed": 9, "totalTime": null, "completedLayouts": null},
                "4": null
            }
        }"#;
        let state: GameState = serde_json::from_str(raw).unwrap();
        assert_eq!(state.current_stage, Stage::FOUR);
        assert_eq!(state.max_unlocked_stage, Stage::FIVE);
        assert_eq!(state.solved_streak, 0);
        assert_eq!(state.give_up_streak, 2);
        let three = state.stats(Stage::THREE).unwrap();
        assert_eq!(three.completed, 9);
        assert!(three.total_time.abs() < f64::EPSILON);
        assert!(three.completed_layouts.is_empty());
        assert_eq!(state.stats(Stage::FOUR), Some(&StageStats::default()));

        let state: GameState =
            serde_json::from_str(r#"{"currentStage": null, "perStage": null}"#).unwrap();
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_stage_conversions() {
        assert_eq!(Stage::new(4), Some(Stage::FOUR));
        assert_eq!(Stage::new(6), None);
        assert!(Stage::try_from(2u8).unwrap_err().is_unsupported_stage());
        assert_eq!(Stage::THREE.next(), Some(Stage::FOUR));
        assert_eq!(Stage::FIVE.next(), None);
        assert_eq!(Stage::THREE.previous(), None);
        assert_eq!(Stage::FIVE.board_size(), BoardSize::FIVE);
        assert_eq!(Stage::FOUR.to_string(), "4x4");
    }
}
