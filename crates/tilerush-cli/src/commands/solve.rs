use tilerush_core::is_solvable;
use tilerush_game::next_hint;
use tilerush_solver::OptimalSolver;

use super::{CommandResult, print_board};
use crate::args::{HintArgs, SolveArgs};

pub fn run_solve(args: &SolveArgs) -> CommandResult {
    let board = &args.board;
    if !OptimalSolver::supports(board.size()) {
        return Err(format!(
            "optimal solving needs a {} board, got {}",
            OptimalSolver::SUPPORTED_SIZE,
            board.size()
        )
        .into());
    }
    if !is_solvable(board) {
        return Err(format!("{} cannot be solved", board.layout_id()).into());
    }

    let moves = OptimalSolver::new().solve(board);
    println!("Moves: {}", moves.len());
    let mut current = board.clone();
    print_board(&current);
    for (step, &index) in moves.iter().enumerate() {
        let tile = current.tile(index).unwrap_or_default();
        current = current.slide(index)?;
        println!();
        println!("{:>3}. slide {tile} (index {index})", step + 1);
        print_board(&current);
    }
    Ok(())
}

pub fn run_hint(args: &HintArgs) -> CommandResult {
    let board = &args.board;
    if board.is_solved() {
        println!("Already solved.");
        return Ok(());
    }
    match next_hint(board, args.previous) {
        Some(index) => {
            let tile = board.tile(index).unwrap_or_default();
            println!("Slide {tile} (index {index})");
        }
        None => println!("No move available."),
    }
    Ok(())
}
