use std::error::Error;

use tilerush_core::Board;
use tilerush_game::{FileStore, Identity, MemoryStore, ProgressTracker, StateStore};

use crate::args::{Command, StoreArgs};

mod generate;
mod play;
mod progress;
mod race;
mod solve;

pub type CommandResult = Result<(), Box<dyn Error>>;

pub fn run(command: Command) -> CommandResult {
    match command {
        Command::Generate(args) => generate::run(&args),
        Command::Solve(args) => solve::run_solve(&args),
        Command::Hint(args) => solve::run_hint(&args),
        Command::Race(args) => race::run(&args),
        Command::Play(args) => play::run(&args),
        Command::Progress(args) => progress::run(args),
    }
}

fn open_tracker(args: &StoreArgs) -> ProgressTracker<Box<dyn StateStore>> {
    let identity = Identity::from_uid(args.user.clone());
    let store: Box<dyn StateStore> = match &identity {
        Identity::Guest => {
            log::warn!("no --user given; guest progress is discarded on exit");
            Box::new(MemoryStore::new())
        }
        Identity::User(_) => {
            let dir = args.data_dir.clone().unwrap_or_else(FileStore::default_dir);
            log::debug!("using saved progress in {}", dir.display());
            Box::new(FileStore::new(dir))
        }
    };
    ProgressTracker::open(store, identity)
}

fn print_board(board: &Board) {
    for line in board.to_string().lines() {
        println!("  {line}");
    }
}
