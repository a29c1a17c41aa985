use std::{
    io::{self, BufRead, Write as _},
    str::FromStr,
    time::SystemTime,
};

use tilerush_game::{GameError, ProgressTracker, PuzzleSession, StateStore};
use tilerush_generator::BoardGenerator;

use super::{CommandResult, open_tracker, print_board};
use crate::args::PlayArgs;

const HELP: &str = "\
Commands:
  <tile>   slide the numbered tile into the blank
  h        hint
  u        undo
  r        redo
  s        restart from the start board
  g        give up
  q        save and quit";

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayCommand {
    Slide(u8),
    Hint,
    Undo,
    Redo,
    Restart,
    GiveUp,
    Quit,
    Help,
}

impl FromStr for PlayCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let command = match s.trim() {
            "h" | "hint" => Self::Hint,
            "u" | "undo" => Self::Undo,
            "r" | "redo" => Self::Redo,
            "s" | "restart" => Self::Restart,
            "g" | "give up" => Self::GiveUp,
            "q" | "quit" => Self::Quit,
            "?" | "help" => Self::Help,
            other => other
                .parse()
                .map(Self::Slide)
                .map_err(|_| format!("unknown command `{other}` (type ? for help)"))?,
        };
        Ok(command)
    }
}

/// How a play loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayEnd {
    Solved,
    GaveUp,
    Quit,
}

pub fn run(args: &PlayArgs) -> CommandResult {
    let mut tracker = open_tracker(&args.store);
    let resumed = if args.new {
        None
    } else {
        tracker.resume_puzzle()
    };
    let mut session = match resumed {
        Some(session) => {
            println!("Resuming your {} puzzle.", session.stage());
            session
        }
        None => tracker.start_puzzle(&BoardGenerator::new(), SystemTime::now())?,
    };

    println!("{HELP}");
    let stdin = io::stdin();
    let end = play_loop(&mut tracker, &mut session, stdin.lock(), SystemTime::now)?;
    match end {
        PlayEnd::Solved | PlayEnd::GaveUp => {
            let state = tracker.state();
            println!(
                "Stage {} (unlocked up to {}), solve streak {}, give-up streak {}",
                state.current_stage,
                state.max_unlocked_stage,
                state.solved_streak,
                state.give_up_streak
            );
        }
        PlayEnd::Quit => println!("Progress saved."),
    }
    tracker.end_session()?;
    Ok(())
}

fn play_loop<S, R, C>(
    tracker: &mut ProgressTracker<S>,
    session: &mut PuzzleSession,
    input: R,
    clock: C,
) -> Result<PlayEnd, Box<dyn std::error::Error>>
where
    S: StateStore,
    R: BufRead,
    C: Fn() -> SystemTime,
{
    show(session);
    let mut lines = input.lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            tracker.save_puzzle(session)?;
            return Ok(PlayEnd::Quit);
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<PlayCommand>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        let now = clock();
        match command {
            PlayCommand::Slide(tile) => {
                let Some(index) = session.board().index_of(tile) else {
                    println!("There is no tile {tile}.");
                    continue;
                };
                match session.try_move(index) {
                    Ok(true) => {
                        show(session);
                        let outcome = tracker.complete_puzzle(session, now)?;
                        println!(
                            "Solved in {} moves, {:.1}s.",
                            session.moves(),
                            session.elapsed(now).as_secs_f64()
                        );
                        if let Some(stage) = outcome.unlocked_stage {
                            println!("Unlocked the {stage} stage!");
                        } else if outcome.promoted {
                            println!("Moving up to the {} stage.", tracker.state().current_stage);
                        }
                        return Ok(PlayEnd::Solved);
                    }
                    Ok(false) => {}
                    Err(err @ GameError::Board(_)) => {
                        println!("Tile {tile} cannot move: {err}");
                        continue;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            PlayCommand::Hint => match session.request_hint(now) {
                Ok(Some(hint)) => {
                    let tile = session.board().tile(hint.index).unwrap_or_default();
                    println!("Try tile {tile}. ({} hints left)", session.hints_left());
                    continue;
                }
                Ok(None) => {
                    println!("No hint available.");
                    continue;
                }
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
            PlayCommand::Undo => {
                if !session.undo() {
                    println!("Nothing to undo.");
                    continue;
                }
            }
            PlayCommand::Redo => {
                if !session.redo() {
                    println!("Nothing to redo.");
                    continue;
                }
            }
            PlayCommand::Restart => session.restart(),
            PlayCommand::GiveUp => {
                let outcome = tracker.give_up_puzzle(session)?;
                if outcome.demoted {
                    println!("Moving down to the {} stage.", outcome.new_stage);
                }
                return Ok(PlayEnd::GaveUp);
            }
            PlayCommand::Quit => {
                tracker.save_puzzle(session)?;
                return Ok(PlayEnd::Quit);
            }
            PlayCommand::Help => {
                println!("{HELP}");
                continue;
            }
        }
        tracker.save_puzzle(session)?;
        show(session);
    }
}

fn show(session: &PuzzleSession) {
    println!();
    print_board(session.board());
    println!("Moves: {}", session.moves());
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tilerush_game::{Identity, MemoryStore, Stage, load_game_state};

    use super::*;

    fn setup(layout: &str) -> (ProgressTracker<MemoryStore>, PuzzleSession, SystemTime) {
        let now = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let tracker = ProgressTracker::open(MemoryStore::new(), Identity::User("t".to_owned()));
        let session = PuzzleSession::new(layout.parse().unwrap(), now).unwrap();
        (tracker, session, now)
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("7".parse::<PlayCommand>(), Ok(PlayCommand::Slide(7)));
        assert_eq!(" u ".parse::<PlayCommand>(), Ok(PlayCommand::Undo));
        assert_eq!("give up".parse::<PlayCommand>(), Ok(PlayCommand::GiveUp));
        assert!("jump".parse::<PlayCommand>().is_err());
        assert!("-1".parse::<PlayCommand>().is_err());
    }

    #[test]
    fn test_solving_records_progress() {
        let (mut tracker, mut session, now) = setup("1,2,3,4,5,6,0,7,8");
        let input = "h\n9\n7\nu\nr\n8\n".as_bytes();
        let end = play_loop(&mut tracker, &mut session, input, || now + Duration::from_secs(8))
            .unwrap();
        assert_eq!(end, PlayEnd::Solved);
        assert_eq!(session.moves(), 2);
        assert_eq!(session.hints_used(), 1);

        let saved = load_game_state(tracker.store(), tracker.identity());
        assert_eq!(saved.stats(Stage::THREE).unwrap().best_time, Some(8.0));
        assert!(saved.current_puzzle.is_none());
    }

    #[test]
    fn test_end_of_input_saves_puzzle() {
        let (mut tracker, mut session, now) = setup("1,2,3,4,5,6,0,7,8");
        let end = play_loop(&mut tracker, &mut session, "7\n".as_bytes(), || now).unwrap();
        assert_eq!(end, PlayEnd::Quit);
        let saved = tracker.state().current_puzzle.as_ref().unwrap();
        assert_eq!(saved.moves, 1);
        assert_eq!(&saved.tiles, session.board());
    }

    #[test]
    fn test_give_up_records_streak() {
        let (mut tracker, mut session, now) = setup("1,2,3,4,5,6,0,7,8");
        let end = play_loop(&mut tracker, &mut session, "g\n".as_bytes(), || now).unwrap();
        assert_eq!(end, PlayEnd::GaveUp);
        assert_eq!(tracker.state().give_up_streak, 1);
    }
}
