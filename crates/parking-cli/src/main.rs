//! Parking Lot - track parked cars and bill them on exit
//!
//! A CLI front-end over an in-memory parking session.

mod cli;
mod commands;
mod logging;
mod output;
mod shell;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
