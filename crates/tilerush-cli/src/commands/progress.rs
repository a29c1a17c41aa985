use tilerush_game::{GameState, Stage};

use super::{CommandResult, open_tracker};
use crate::args::{ProgressAction, ProgressArgs};

pub fn run(args: ProgressArgs) -> CommandResult {
    let mut tracker = open_tracker(&args.store);
    let stage = tracker.state().current_stage;

    match args.action.unwrap_or(ProgressAction::Show) {
        ProgressAction::Show => {}
        ProgressAction::Solve { seconds } => {
            if !seconds.is_finite() || seconds < 0.0 {
                return Err(format!("invalid solve time {seconds}").into());
            }
            let outcome = tracker.record_solve(seconds, stage)?;
            if let Some(unlocked) = outcome.unlocked_stage {
                println!("Unlocked {unlocked}.");
            }
            if outcome.promoted {
                println!("Promoted to {}.", tracker.state().current_stage);
            }
        }
        ProgressAction::GiveUp => {
            let outcome = tracker.record_give_up(stage)?;
            if outcome.demoted {
                println!("Demoted to {}.", outcome.new_stage);
            }
        }
        ProgressAction::Select { stage } => {
            let stage = Stage::try_from(stage)?;
            if !tracker.set_current_stage(stage)? {
                return Err(format!(
                    "{stage} is locked (unlocked up to {})",
                    tracker.state().max_unlocked_stage
                )
                .into());
            }
        }
    }

    print_state(tracker.state());
    tracker.end_session()?;
    Ok(())
}

fn print_state(state: &GameState) {
    println!("Stage: {}", state.current_stage);
    println!("Unlocked up to: {}", state.max_unlocked_stage);
    println!("Solve streak: {}", state.solved_streak);
    println!("Give-up streak: {}", state.give_up_streak);
    if state.current_puzzle.is_some() {
        println!("A puzzle is in progress.");
    }
    println!();
    println!("{:<6} {:>6} {:>9} {:>9}", "stage", "solved", "best", "average");
    for stage in Stage::ALL {
        let Some(stats) = state.stats(stage) else {
            continue;
        };
        println!(
            "{:<6} {:>6} {:>9} {:>9}",
            stage.to_string(),
            stats.completed,
            format_seconds(stats.best_time),
            format_seconds(stats.average_time()),
        );
    }
}

fn format_seconds(seconds: Option<f64>) -> String {
    seconds.map_or_else(|| "-".to_owned(), |seconds| format!("{seconds:.1}s"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(None), "-");
        assert_eq!(format_seconds(Some(12.345)), "12.3s");
    }
}
