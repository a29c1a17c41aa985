use std::collections::HashSet;

use tilerush_core::BoardSize;
use tilerush_generator::{BoardGenerator, BoardSeed, scramble_walk};
use tilerush_solver::OptimalSolver;

use super::{CommandResult, print_board};
use crate::args::GenerateArgs;

pub fn run(args: &GenerateArgs) -> CommandResult {
    let size = BoardSize::new(args.size)?;
    let seed = args.seed.unwrap_or_else(BoardSeed::random);

    let board = if let Some(steps) = args.scramble {
        scramble_walk(size, steps, seed)
    } else {
        let generated = BoardGenerator::new().generate_with_seed(size, seed, &HashSet::new());
        if generated.fallback {
            log::warn!("generator gave up after {} attempts", generated.attempts);
        }
        generated.board
    };

    println!("Seed: {seed}");
    println!("Layout: {}", board.layout_id());
    print_board(&board);
    println!("Misplaced: {}", board.misplaced_tiles());
    println!("Manhattan: {}", board.manhattan_distance());
    if let Some(distance) = OptimalSolver::new().distance(&board) {
        println!("Optimal: {distance}");
    }
    Ok(())
}
