use std::{ops::Range, str::FromStr, time::Duration};

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Delay used when no recognized difficulty tier is configured.
pub const FALLBACK_DELAY: Duration = Duration::from_millis(700);

/// Bot difficulty tier.
///
/// Parsing is case-insensitive, and `moderate` is accepted as an alias for
/// [`Difficulty::Medium`].
///
/// # Examples
///
/// ```
/// use tilerush_bot::Difficulty;
///
/// assert_eq!("Hard".parse::<Difficulty>()?, Difficulty::Hard);
/// assert_eq!("moderate".parse::<Difficulty>()?, Difficulty::Medium);
/// assert!("impossible".parse::<Difficulty>().is_err());
/// # Ok::<(), tilerush_bot::ParseDifficultyError>(())
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Difficulty {
    /// Slow and error-prone.
    #[display("easy")]
    Easy,
    /// The default opponent.
    #[default]
    #[display("medium")]
    Medium,
    /// Fast and (nearly) optimal.
    #[display("hard")]
    Hard,
    /// Between easy and medium, with a hesitant play style.
    #[display("adaptive")]
    Adaptive,
}

impl Difficulty {
    /// All tiers, from easiest to hardest opponent.
    pub const ALL: [Self; 4] = [Self::Easy, Self::Adaptive, Self::Medium, Self::Hard];

    /// Probability of replaying the previous move at an interior plan step.
    #[must_use]
    pub const fn backtrack_probability(self) -> f64 {
        match self {
            Self::Easy => 0.25,
            Self::Medium => 0.10,
            Self::Adaptive => 0.05,
            Self::Hard => 0.0,
        }
    }

    /// Probability of inserting a move copied from an earlier plan step.
    #[must_use]
    pub const fn copy_probability(self) -> f64 {
        match self {
            Self::Easy => 0.20,
            Self::Medium | Self::Hard | Self::Adaptive => 0.0,
        }
    }

    /// Per-step `(pause, mistake)` probabilities for reactive play.
    #[must_use]
    pub const fn decision_odds(self) -> (f64, f64) {
        match self {
            Self::Easy => (0.30, 0.35),
            Self::Medium => (0.12, 0.22),
            Self::Hard => (0.03, 0.06),
            Self::Adaptive => (0.18, 0.25),
        }
    }

    /// Range of per-step delays in milliseconds for planned play.
    #[must_use]
    pub const fn delay_range_ms(self) -> Range<u64> {
        match self {
            Self::Easy => 1200..1800,
            Self::Medium => 750..1050,
            Self::Hard => 330..450,
            Self::Adaptive => 600..850,
        }
    }

    /// Fixed per-step delay for reactive play.
    #[must_use]
    pub const fn base_delay(self) -> Duration {
        Duration::from_millis(match self {
            Self::Easy => 1150,
            Self::Medium | Self::Adaptive => 800,
            Self::Hard => 450,
        })
    }

    /// Length of the random walk used to scramble a board for this tier.
    #[must_use]
    pub const fn scramble_steps(self) -> usize {
        match self {
            Self::Easy => 5,
            Self::Medium => 20,
            Self::Hard => 50,
            Self::Adaptive => 30,
        }
    }
}

/// Error returned when a difficulty name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown difficulty `{name}` (expected easy, medium, hard or adaptive)")]
pub struct ParseDifficultyError {
    name: String,
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        [
            ("easy", Self::Easy),
            ("medium", Self::Medium),
            ("moderate", Self::Medium),
            ("hard", Self::Hard),
            ("adaptive", Self::Adaptive),
        ]
        .into_iter()
        .find_map(|(candidate, tier)| candidate.eq_ignore_ascii_case(name).then_some(tier))
        .ok_or_else(|| ParseDifficultyError {
            name: name.to_owned(),
        })
    }
}

/// Samples the delay before the next planned step.
///
/// Each call draws independently from the tier's range; `None` (an unrecognized
/// tier) always yields [`FALLBACK_DELAY`].
#[must_use]
pub fn sample_delay(difficulty: Option<Difficulty>, rng: &mut Pcg64) -> Duration {
    match difficulty {
        Some(tier) => Duration::from_millis(rng.random_range(tier.delay_range_ms())),
        None => FALLBACK_DELAY,
    }
}
