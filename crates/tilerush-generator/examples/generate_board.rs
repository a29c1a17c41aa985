//! Example demonstrating solvable board generation.
//!
//! This example shows how to:
//! - Generate a random solvable board of a given size
//! - Reproduce a board from its seed
//! - Sample many boards in parallel and keep the hardest one
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_board
//! ```
//!
//! Generate a 4x4 board:
//!
//! ```sh
//! cargo run --example generate_board -- --size 4
//! ```
//!
//! Reproduce a board from a previously printed seed:
//!
//! ```sh
//! cargo run --example generate_board -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```
//!
//! Keep the hardest of many boards. 3x3 boards are scored by their optimal solution
//! length, larger boards by Manhattan distance:
//!
//! ```sh
//! cargo run --example generate_board -- --hardest-of 200
//! ```

use std::{collections::HashSet, process};

use clap::Parser;
use rayon::prelude::*;
use tilerush_core::{Board, BoardSize, is_solvable};
use tilerush_generator::{BoardGenerator, BoardSeed, GeneratedBoard};
use tilerush_solver::OptimalSolver;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board edge length.
    #[arg(long, value_name = "N", default_value_t = 3)]
    size: u8,

    /// Seed to regenerate a specific board (64 hex characters).
    #[arg(long, value_name = "SEED")]
    seed: Option<BoardSeed>,

    /// Number of boards to sample when searching for the hardest one.
    #[arg(long, value_name = "COUNT")]
    hardest_of: Option<usize>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let size = match BoardSize::new(args.size) {
        Ok(size) => size,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };
    let generator = BoardGenerator::new();

    if let Some(seed) = args.seed {
        let generated = generator.generate_with_seed(size, seed, &HashSet::new());
        print_board(&generated);
        return;
    }

    let Some(count) = args.hardest_of else {
        print_board(&generator.generate(size));
        return;
    };
    if count == 0 {
        eprintln!("--hardest-of must be at least 1.");
        process::exit(1);
    }

    let hardest = (0..count)
        .into_par_iter()
        .map(|_| {
            let generated = generator.generate(size);
            let score = difficulty(&generated.board);
            (generated, score)
        })
        .max_by_key(|(_, score)| *score);

    if let Some((generated, score)) = hardest {
        println!("Selection:");
        println!("  Sampled: {count}");
        println!("  Best score: {score}");
        println!();
        print_board(&generated);
    }
}

fn difficulty(board: &Board) -> usize {
    OptimalSolver::new()
        .distance(board)
        .unwrap_or_else(|| board.manhattan_distance())
}

fn print_board(generated: &GeneratedBoard) {
    let board = &generated.board;
    assert!(is_solvable(board));

    println!("Seed:");
    println!("  {}", generated.seed);
    println!();
    println!("Layout:");
    println!("  {}", board.layout_id());
    println!();
    println!("Board:");
    for line in board.to_string().lines() {
        println!("  {line}");
    }
    println!();
    println!("Stats:");
    println!("  attempts: {}", generated.attempts);
    println!("  fallback: {}", generated.fallback);
    println!("  misplaced: {}", board.misplaced_tiles());
    println!("  manhattan: {}", board.manhattan_distance());
    if let Some(distance) = OptimalSolver::new().distance(board) {
        println!("  optimal: {distance}");
    }
}
