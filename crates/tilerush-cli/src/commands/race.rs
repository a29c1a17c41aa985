use std::time::Duration;

use tilerush_bot::{
    BotBrain, BotConfig, BotDecision, BotMode, BotScheduler, Difficulty, MoveQuality,
};
use tilerush_core::{Board, BoardSize, is_solvable};
use tilerush_game::{Race, Racer};
use tilerush_generator::{BoardSeed, scramble_walk};
use tilerush_solver::{OptimalSolver, greedy_move};

use super::{CommandResult, print_board};
use crate::args::RaceArgs;

const DEFAULT_SCRAMBLE_STEPS: usize = 30;

pub fn run(args: &RaceArgs) -> CommandResult {
    let tier = args.tier();
    if tier.is_none() {
        log::warn!(
            "unknown difficulty `{}`; the bot plays the optimal line",
            args.difficulty
        );
    }
    let seed = args.seed.unwrap_or_else(BoardSeed::random);
    let start = race_start(args.board.as_ref(), args.size, tier, seed)?;
    let mode = args.mode.unwrap_or_else(|| default_mode(start.size()));
    let config = BotConfig::from_tier_name(&args.difficulty).with_mode(mode);

    println!("Seed: {seed}");
    println!(
        "Bot: {} ({mode})",
        tier.map_or_else(|| "unranked".to_owned(), |tier| tier.to_string())
    );
    print_board(&start);
    println!();

    let race = Race::new(start);
    let brain = BotBrain::with_seed(config, race.start(), seed);
    let player_pace = args.player_pace.map(Duration::from_millis);
    let report = run_race(race, brain, player_pace, args.max_steps, |event| {
        println!("{event}");
    });

    println!();
    match report.winner {
        Some(winner) => println!(
            "Winner: {winner} after {:.3}s",
            report.elapsed.as_secs_f64()
        ),
        None => println!("No winner after {:.3}s", report.elapsed.as_secs_f64()),
    }
    println!("Bot moves: {}", report.bot_moves);
    if player_pace.is_some() {
        println!("Player moves: {}", report.player_moves);
    }
    Ok(())
}

/// Returns the given start board if it can be solved, or a tier-sized scramble.
fn race_start(
    board: Option<&Board>,
    size: u8,
    tier: Option<Difficulty>,
    seed: BoardSeed,
) -> Result<Board, Box<dyn std::error::Error>> {
    match board {
        Some(board) if !is_solvable(board) => {
            Err(format!("{} cannot be solved", board.layout_id()).into())
        }
        Some(board) => Ok(board.clone()),
        None => {
            let steps = tier.map_or(DEFAULT_SCRAMBLE_STEPS, Difficulty::scramble_steps);
            Ok(scramble_walk(BoardSize::new(size)?, steps, seed))
        }
    }
}

/// The planned bot has no plan beyond the optimal solver's reach.
fn default_mode(size: BoardSize) -> BotMode {
    if OptimalSolver::supports(size) {
        BotMode::Planned
    } else {
        BotMode::Reactive
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RaceEvent {
    at: Duration,
    racer: Racer,
    decision: BotDecision,
}

impl std::fmt::Display for RaceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:>8.3}s] {:<6} ", self.at.as_secs_f64(), self.racer)?;
        match self.decision {
            BotDecision::Pause => write!(f, "pause"),
            BotDecision::Move { index, quality } => write!(f, "move {index} ({quality})"),
            BotDecision::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RaceReport {
    winner: Option<Racer>,
    elapsed: Duration,
    bot_moves: u32,
    player_moves: u32,
}

/// Simulated player: optimal moves where available, greedy ones elsewhere.
struct Autoplayer {
    pace: Duration,
    next_at: Duration,
    previous_blank: Option<usize>,
}

impl Autoplayer {
    fn new(pace: Duration) -> Self {
        Self {
            pace,
            next_at: pace,
            previous_blank: None,
        }
    }

    fn choose(&mut self, board: &Board) -> Option<usize> {
        let index = OptimalSolver::new()
            .next_move(board)
            .or_else(|| greedy_move(board, self.previous_blank))?;
        self.previous_blank = Some(board.blank_index());
        self.next_at += self.pace;
        Some(index)
    }
}

/// Drives `race` on a virtual clock until someone wins, nobody can move or the bot
/// has taken `max_steps` steps.
fn run_race<F>(
    mut race: Race,
    brain: BotBrain,
    player_pace: Option<Duration>,
    max_steps: usize,
    mut on_event: F,
) -> RaceReport
where
    F: FnMut(&RaceEvent),
{
    let mut scheduler = BotScheduler::start_with_handle(brain, Duration::ZERO, race.cancel_handle());
    let mut player = player_pace.map(Autoplayer::new);
    let mut now = Duration::ZERO;

    while !race.is_over() && scheduler.steps() < max_steps {
        let bot_at = scheduler.next_deadline();
        let player_at = player.as_ref().map(|player| player.next_at);
        let player_turn = match (bot_at, player_at) {
            (None, None) => break,
            (Some(_), None) => false,
            (None, Some(_)) => true,
            // The player wins ties.
            (Some(bot_at), Some(player_at)) => player_at <= bot_at,
        };

        if player_turn && let Some(player) = &mut player {
            now = player.next_at;
            let Some(index) = player.choose(race.player_board()) else {
                break;
            };
            if race.player_move(index).is_ok() {
                on_event(&RaceEvent {
                    at: now,
                    racer: Racer::Player,
                    decision: BotDecision::Move {
                        index,
                        quality: MoveQuality::Best,
                    },
                });
            }
            continue;
        }

        let Some(deadline) = bot_at else {
            break;
        };
        now = deadline;
        if let Some(step) = scheduler.poll(now, race.bot_board()) {
            on_event(&RaceEvent {
                at: now,
                racer: Racer::Bot,
                decision: step.decision,
            });
            if let Err(err) = race.apply_bot_step(&step) {
                log::debug!("bot step ignored: {err}");
            }
        }
    }

    if !race.is_over() {
        race.abandon();
    }
    RaceReport {
        winner: race.winner(),
        elapsed: now,
        bot_moves: race.bot_moves(),
        player_moves: race.player_moves(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn brain(start: &Board, tier: Difficulty) -> BotBrain {
        BotBrain::with_seed(BotConfig::new(tier), start, BoardSeed::from([5; 32]))
    }

    #[test]
    fn test_unsolvable_start_board_is_rejected() {
        let seed = BoardSeed::from([1; 32]);
        let unsolvable = board("2,1,3,4,5,6,7,8,0");
        let err = race_start(Some(&unsolvable), 3, None, seed).unwrap_err();
        assert!(err.to_string().contains("2,1,3,4,5,6,7,8,0"));

        let solvable = board("1,0,3,4,2,5,7,8,6");
        assert_eq!(race_start(Some(&solvable), 3, None, seed).unwrap(), solvable);

        let scrambled = race_start(None, 4, Some(Difficulty::Easy), seed).unwrap();
        assert_eq!(scrambled.size(), BoardSize::FOUR);
        assert!(is_solvable(&scrambled));
    }

    #[test]
    fn test_bot_alone_wins() {
        let start = board("1,0,3,4,2,5,7,8,6");
        let mut events = Vec::new();
        let report = run_race(
            Race::new(start.clone()),
            brain(&start, Difficulty::Hard),
            None,
            100,
            |event| events.push(event.clone()),
        );
        assert_eq!(report.winner, Some(Racer::Bot));
        assert_eq!(report.bot_moves, 3);
        assert!(events.iter().all(|event| event.racer == Racer::Bot));
        assert!(events.windows(2).all(|pair| pair[0].at < pair[1].at));
    }

    #[test]
    fn test_fast_player_beats_slow_bot() {
        let start = board("1,0,3,4,2,5,7,8,6");
        let report = run_race(
            Race::new(start.clone()),
            brain(&start, Difficulty::Easy),
            Some(Duration::from_millis(100)),
            100,
            |_| {},
        );
        assert_eq!(report.winner, Some(Racer::Player));
        assert_eq!(report.player_moves, 3);
        assert_eq!(report.elapsed, Duration::from_millis(300));
        assert_eq!(report.bot_moves, 0);
    }

    #[test]
    fn test_step_cap_ends_without_winner() {
        let start = board("8,6,7,2,5,4,3,0,1");
        let report = run_race(
            Race::new(start.clone()),
            brain(&start, Difficulty::Easy),
            None,
            2,
            |_| {},
        );
        assert_eq!(report.winner, None);
    }

    #[test]
    fn test_planned_bot_is_done_on_large_boards() {
        let start = board("1,2,3,4,5,6,7,8,9,10,11,12,13,14,0,15");
        let report = run_race(
            Race::new(start.clone()),
            brain(&start, Difficulty::Hard),
            None,
            100,
            |_| {},
        );
        assert_eq!(report.winner, None);
        assert_eq!(report.bot_moves, 0);
        assert_eq!(default_mode(start.size()), BotMode::Reactive);
    }
}
