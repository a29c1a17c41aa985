//! Command-line front end for TileRush.
//!
//! Generates and solves boards, runs bot races on a virtual clock and plays puzzles
//! on the terminal with saved stage progression.

use clap::Parser as _;

use crate::args::Cli;

mod args;
mod commands;
mod version;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    better_panic::install();
    env_logger::init();

    let cli = Cli::parse();
    log::debug!("tilerush {}", version::build_version());
    commands::run(cli.command)
}
